//! Player and dealer hand representations.

use crate::card::Card;
use crate::codec::Token;

/// Total of a hand and whether an ace still counts as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandValue {
    /// Best total not exceeding 21 where possible.
    pub total: u32,
    /// Whether an ace is still counted as 11.
    pub soft: bool,
}

/// Values a hand: every ace starts at 11 and is demoted to 1 while the total
/// is over 21.
///
/// ```
/// use turnstate::{Card, hand_value};
///
/// let cards = [Card::from_code("AS").unwrap(), Card::from_code("6H").unwrap()];
/// let value = hand_value(&cards);
/// assert_eq!((value.total, value.soft), (17, true));
/// ```
#[must_use]
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.is_ace() {
            aces = aces.saturating_add(1);
        }
        total = total.saturating_add(u32::from(card.value()));
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        soft: aces > 0,
    }
}

/// Returns whether `cards` is a two-card 21.
#[must_use]
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).total == 21
}

/// Hand status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    #[default]
    Active,
    /// Player has stood (or reached 21).
    Stood,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a natural. Accepted from state strings; the engine itself
    /// computes naturals from the cards instead of assigning this label.
    Blackjack,
}

impl Token for HandStatus {
    fn token(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stood => "stood",
            Self::Bust => "bust",
            Self::Blackjack => "blackjack",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "stood" => Some(Self::Stood),
            "bust" => Some(Self::Bust),
            "blackjack" => Some(Self::Blackjack),
            _ => None,
        }
    }
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Current status of the hand.
    status: HandStatus,
    /// Whether the hand was doubled down.
    doubled: bool,
}

impl Hand {
    /// Creates an active hand holding `cards`.
    #[must_use]
    pub const fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            status: HandStatus::Active,
            doubled: false,
        }
    }

    /// Rebuilds a hand from its decoded parts.
    #[must_use]
    pub const fn from_parts(cards: Vec<Card>, status: HandStatus, doubled: bool) -> Self {
        Self {
            cards,
            status,
            doubled,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the hand was doubled down.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Marks the hand as doubled down.
    pub const fn mark_doubled(&mut self) {
        self.doubled = true;
    }

    /// Returns whether the hand can still act.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == HandStatus::Active
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Returns whether the two cards share a rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [first, second] if first.rank == second.rank)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerHand {
    cards: Vec<Card>,
}

impl DealerHand {
    /// Creates a dealer hand holding `cards`.
    #[must_use]
    pub const fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the cards a player may see: everything when `reveal_hole`,
    /// otherwise only the up card.
    #[must_use]
    pub fn visible_cards(&self, reveal_hole: bool) -> &[Card] {
        if reveal_hole {
            &self.cards
        } else {
            self.up_card().map_or(&[], core::slice::from_ref)
        }
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value().total > 21
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
