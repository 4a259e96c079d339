//! Blackjack state types and their canonical text form.
//!
//! Canonical layout:
//! `S:<shoe>|P:<hands>|D:<dealer>|[BK:<stack>|B:<bet>|]T:<turn>|H:<index>|ST:<status>|LA:<last>|R:<results>`.
//! Hands are `cards@status@doubled` triples joined by `;`.

use core::fmt;
use core::str::FromStr;
use std::collections::VecDeque;

use crate::card::Card;
use crate::codec::{
    EMPTY_FIELD, GameKind, MAX_CHIPS, Segments, Status, Token, parse_chips, parse_count,
    parse_list, text_or_dash, write_list,
};
use crate::error::{ActionError, StateError};
use crate::hand::{DealerHand, Hand, HandStatus};
use crate::result::HandOutcome;

const GAME: GameKind = GameKind::Blackjack;

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Turn {
    /// The player is acting on `hand_index`.
    #[default]
    Player,
    /// The dealer is playing out their hand.
    Dealer,
}

impl Token for Turn {
    fn token(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Dealer => "dealer",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "player" => Some(Self::Player),
            "dealer" => Some(Self::Dealer),
            _ => None,
        }
    }
}

/// Bankroll carried alongside a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wager {
    /// Chips the player holds, settled when the round ends.
    pub stack: u64,
    /// Base bet per hand.
    pub bet: u64,
}

impl Wager {
    /// Creates a wager, checking that the bet is payable.
    ///
    /// # Errors
    ///
    /// Returns an error if the stack or bet is zero, the bet exceeds the
    /// stack, or the stack is above [`MAX_CHIPS`].
    pub const fn new(stack: u64, bet: u64) -> Result<Self, ActionError> {
        if stack > MAX_CHIPS {
            return Err(ActionError::AmountOutOfRange);
        }
        if stack == 0 {
            return Err(ActionError::StackNotPositive);
        }
        if bet == 0 {
            return Err(ActionError::BetNotPositive);
        }
        if bet > stack {
            return Err(ActionError::BetExceedsStack);
        }
        Ok(Self { stack, bet })
    }

    /// Returns whether both amounts are at most [`MAX_CHIPS`].
    #[must_use]
    pub const fn is_within_limits(self) -> bool {
        self.stack <= MAX_CHIPS && self.bet <= MAX_CHIPS
    }
}

/// Complete, authoritative blackjack round, including the hole card and the
/// order of the remaining shoe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackjackState {
    /// Remaining cards; the front is drawn next.
    pub shoe: VecDeque<Card>,
    /// Player hands (one, or up to four after splits).
    pub hands: Vec<Hand>,
    /// Dealer cards; the second card is the hole card.
    pub dealer: DealerHand,
    /// Optional bankroll.
    pub wager: Option<Wager>,
    /// Whose turn it is.
    pub turn: Turn,
    /// Index of the hand currently acting.
    pub hand_index: usize,
    /// Round status.
    pub status: Status,
    /// Description of the most recent action.
    pub last_action: Option<String>,
    /// One verdict per hand, present once the round is over.
    pub results: Option<Vec<HandOutcome>>,
}

impl BlackjackState {
    /// Parses a canonical state string.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the first malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;

        let shoe = parse_cards(segments.get("S"))?.into();
        let hands = parse_hands(segments.get("P"))?;
        let dealer = DealerHand::new(parse_cards(segments.get("D"))?);
        let wager = match (segments.get("BK"), segments.get("B")) {
            (Some(stack), Some(bet)) => Some(Wager {
                stack: parse_chips(GAME, "stack", stack)?,
                bet: parse_chips(GAME, "bet", bet)?,
            }),
            (None, None) => None,
            (None, Some(_)) => return Err(StateError::MissingSegment { game: GAME, key: "BK" }),
            (Some(_), None) => return Err(StateError::MissingSegment { game: GAME, key: "B" }),
        };
        let turn = segments.token_or("T", Turn::Player, StateError::Turn(GAME))?;
        let hand_index = segments
            .get_non_empty("H")
            .map_or(Ok(0), |raw| parse_count(GAME, "hand index", raw))?;
        let status = segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?;
        let last_action = segments.text("LA");
        let results = match segments.get_non_empty("R") {
            None | Some(EMPTY_FIELD) => None,
            Some(raw) => Some(
                parse_list(Some(raw))
                    .into_iter()
                    .map(|item| HandOutcome::from_token(item).ok_or(StateError::Verdict(GAME)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Self {
            shoe,
            hands,
            dealer,
            wager,
            turn,
            hand_index: usize::try_from(hand_index)
                .map_err(|_| StateError::Number { game: GAME, field: "hand index" })?,
            status,
            last_action,
            results,
        })
    }

    /// Returns the hand currently acting, if the index is in range.
    #[must_use]
    pub fn current_hand(&self) -> Option<&Hand> {
        self.hands.get(self.hand_index)
    }

    /// Returns whether every dealer card may be shown to the player.
    #[must_use]
    pub fn reveals_dealer(&self) -> bool {
        self.turn == Turn::Dealer || self.status == Status::GameOver
    }

    /// Returns the chips committed across all hands.
    #[must_use]
    pub fn committed(&self) -> u64 {
        self.wager.map_or(0, |wager| {
            self.hands
                .iter()
                .fold(0, |total: u64, hand| total.saturating_add(stake(wager.bet, hand)))
        })
    }

    /// Returns whether the bankroll can cover one more base bet.
    ///
    /// Rounds without a wager can always afford it.
    #[must_use]
    pub fn can_afford_another_bet(&self) -> bool {
        self.wager
            .is_none_or(|wager| self.committed().saturating_add(wager.bet) <= wager.stack)
    }

    /// Writes the results segment value, `-` while the round is open.
    pub(super) fn results_text(&self) -> String {
        self.results.as_ref().map_or_else(
            || EMPTY_FIELD.to_owned(),
            |results| write_list(results.iter().map(|outcome| outcome.token())),
        )
    }

    /// Draws the next card from the front of the shoe.
    pub(crate) fn draw(&mut self) -> Result<Card, ActionError> {
        self.shoe.pop_front().ok_or(ActionError::EmptyShoe)
    }
}

/// Chips at risk on `hand` for a base bet.
pub(crate) const fn stake(bet: u64, hand: &Hand) -> u64 {
    if hand.is_doubled() { bet.saturating_mul(2) } else { bet }
}

impl FromStr for BlackjackState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BlackjackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S:{}|P:{}|D:{}|",
            write_list(&self.shoe),
            write_hands(&self.hands),
            write_list(self.dealer.cards()),
        )?;
        if let Some(wager) = self.wager {
            write!(f, "BK:{}|B:{}|", wager.stack, wager.bet)?;
        }
        write!(
            f,
            "T:{}|H:{}|ST:{}|LA:{}|R:{}",
            self.turn.token(),
            self.hand_index,
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
            self.results_text(),
        )
    }
}

fn parse_cards(raw: Option<&str>) -> Result<Vec<Card>, StateError> {
    parse_list(raw)
        .into_iter()
        .map(|code| Card::from_code(code).ok_or(StateError::Card(GAME)))
        .collect()
}

fn parse_hands(raw: Option<&str>) -> Result<Vec<Hand>, StateError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty() && *raw != EMPTY_FIELD) else {
        return Ok(Vec::new());
    };

    raw.split(';')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut parts = chunk.split('@');
            let (Some(cards), Some(status), Some(doubled), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(StateError::HandFormat(GAME));
            };
            let status = HandStatus::from_token(status).ok_or(StateError::HandStatus(GAME))?;
            let doubled = match doubled {
                "0" => false,
                "1" => true,
                _ => return Err(StateError::HandFormat(GAME)),
            };
            Ok(Hand::from_parts(parse_cards(Some(cards))?, status, doubled))
        })
        .collect()
}

pub(super) fn write_hands(hands: &[Hand]) -> String {
    if hands.is_empty() {
        return EMPTY_FIELD.to_owned();
    }
    hands
        .iter()
        .map(|hand| {
            format!(
                "{}@{}@{}",
                write_list(hand.cards()),
                hand.status().token(),
                u8::from(hand.is_doubled()),
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}
