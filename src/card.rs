//! Card types and deck utilities.

use core::fmt;

/// Rank characters in rank order, ace first.
pub const RANKS: &str = "A23456789TJQK";

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
}

impl Suit {
    /// All suits in shoe-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Returns the suit letter used in state strings.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
        }
    }

    /// Parses a suit letter.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'S' => Some(Self::Spades),
            'H' => Some(Self::Hearts),
            'D' => Some(Self::Diamonds),
            'C' => Some(Self::Clubs),
            _ => None,
        }
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 10 = Ten, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but cannot be written to a state string.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Parses a two-character card code such as `AS` or `TD`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        let rank = RANKS.find(rank)? as u8 + 1;
        Some(Self::new(Suit::from_symbol(suit)?, rank))
    }

    /// Returns the rank character (`A`, `2`..`9`, `T`, `J`, `Q`, `K`).
    #[must_use]
    pub fn rank_symbol(self) -> char {
        RANKS
            .as_bytes()
            .get(usize::from(self.rank).wrapping_sub(1))
            .map_or('?', |&b| char::from(b))
    }

    /// Returns the blackjack value of the card, counting an ace as 11.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self.rank {
            1 => 11,
            2..=10 => self.rank,
            11..=13 => 10,
            _ => 0,
        }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_symbol(), self.suit.symbol())
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Returns one unshuffled deck, rank-major (`AS`, `AH`, `AD`, `AC`, `2S`, ...).
#[must_use]
pub fn deck() -> Vec<Card> {
    (1..=13)
        .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(suit, rank)))
        .collect()
}
