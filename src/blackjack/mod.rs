//! Blackjack engine over canonical state strings.
//!
//! A round is dealt by [`Blackjack::new_game`], then driven one action at a
//! time with [`Blackjack::apply`]. The player acts on each hand in order,
//! then the dealer draws to 17. Hidden information stays out of the
//! caller's hands through [`PublicStateCodec`].

use core::fmt;
use core::str::FromStr;

use tracing::debug;

use crate::codec::Status;
use crate::error::ActionError;
use crate::options::GameOptions;
use crate::outcome::Outcome;
use crate::result::HandOutcome;

mod actions;
mod bet;
mod dealer;
pub mod public;
pub mod state;

pub use public::{PublicStateCodec, STATE_TOKEN_VERSION};
pub use dealer::resolve_results;
pub use state::{BlackjackState, Turn, Wager};

/// Most hands a player may hold after splitting.
pub const MAX_HANDS: usize = 4;

/// An action on the current hand or on the dealer's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlackjackAction {
    /// Draw one card.
    Hit,
    /// Keep the current total.
    Stand,
    /// Double the stake, draw exactly one card, and finish the hand.
    Double,
    /// Split a pair into two hands.
    Split,
}

impl BlackjackAction {
    /// Returns the action name used in state strings and by callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for BlackjackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlackjackAction {
    type Err = ActionError;

    /// Parses an action name, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(ActionError::InvalidAction),
            "hit" => Ok(Self::Hit),
            "stand" => Ok(Self::Stand),
            "double" => Ok(Self::Double),
            "split" => Ok(Self::Split),
            _ => Err(ActionError::IllegalAction),
        }
    }
}

/// Summary of one applied blackjack action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackjackTurn {
    /// The new canonical state string.
    pub state: String,
    /// Round status after the action.
    pub status: Status,
    /// Whose turn it is now.
    pub turn: Turn,
    /// The action that was applied.
    pub last_action: Option<String>,
    /// Per-hand verdicts, once the round is over.
    pub results: Option<Vec<HandOutcome>>,
    /// Index of the hand now acting.
    pub hand_index: usize,
}

impl From<&BlackjackState> for BlackjackTurn {
    fn from(state: &BlackjackState) -> Self {
        Self {
            state: state.to_string(),
            status: state.status,
            turn: state.turn,
            last_action: state.last_action.clone(),
            results: state.results.clone(),
            hand_index: state.hand_index,
        }
    }
}

/// A blackjack table: fixed rules plus [`GameOptions`].
///
/// The table holds no round state; every call takes the round as input.
#[derive(Debug, Clone, Default)]
pub struct Blackjack {
    /// Table options.
    pub options: GameOptions,
}

impl Blackjack {
    /// Creates a table with the given options.
    #[must_use]
    pub const fn new(options: GameOptions) -> Self {
        Self { options }
    }

    /// Returns the actions the player may take on the current hand.
    ///
    /// `hit` and `stand` are always offered for an active hand; `double`
    /// needs exactly two cards; `split` needs a two-card pair and fewer than
    /// [`MAX_HANDS`] hands. With a wager, doubling and splitting also need
    /// the bankroll to cover another bet.
    #[must_use]
    pub fn legal_player_actions(&self, state: &BlackjackState) -> Vec<BlackjackAction> {
        if state.status != Status::InProgress || state.turn != Turn::Player {
            return Vec::new();
        }
        let Some(hand) = state.current_hand().filter(|hand| hand.is_active()) else {
            return Vec::new();
        };

        let mut actions = vec![BlackjackAction::Hit, BlackjackAction::Stand];
        if hand.len() == 2 && state.can_afford_another_bet() {
            actions.push(BlackjackAction::Double);
        }
        if hand.is_pair() && state.hands.len() < MAX_HANDS && state.can_afford_another_bet() {
            actions.push(BlackjackAction::Split);
        }
        actions
    }

    /// Returns the dealer's single forced action: `hit` below 17, else `stand`.
    #[must_use]
    pub fn legal_dealer_actions(&self, state: &BlackjackState) -> Vec<BlackjackAction> {
        if state.status != Status::InProgress || state.turn != Turn::Dealer {
            return Vec::new();
        }
        if state.dealer.value().total < 17 {
            vec![BlackjackAction::Hit]
        } else {
            vec![BlackjackAction::Stand]
        }
    }

    /// Applies one action to a parsed round, returning the next round.
    ///
    /// The input is left untouched, so a failed action has no effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is empty or unknown, the round is over,
    /// the action is not legal for the side to act, the wager is beyond
    /// [`MAX_CHIPS`](crate::MAX_CHIPS), or the shoe runs out.
    pub fn play(&self, state: &BlackjackState, action: &str) -> Result<BlackjackState, ActionError> {
        let action: BlackjackAction = action.parse()?;
        if state.status != Status::InProgress {
            return Err(ActionError::GameOver);
        }
        if state.wager.is_some_and(|wager| !wager.is_within_limits()) {
            return Err(ActionError::AmountOutOfRange);
        }

        let mut next = state.clone();
        match state.turn {
            Turn::Player => {
                if !self.legal_player_actions(state).contains(&action) {
                    return Err(ActionError::IllegalAction);
                }
                self.apply_player_action(&mut next, action)?;
            }
            Turn::Dealer => {
                if !self.legal_dealer_actions(state).contains(&action) {
                    return Err(ActionError::IllegalAction);
                }
                self.apply_dealer_action(&mut next, action)?;
            }
        }
        next.last_action = Some(action.as_str().to_owned());
        Ok(next)
    }

    /// Parses `state`, applies `action`, and re-serializes.
    ///
    /// On any failure the caller's string is echoed back unchanged.
    #[must_use]
    pub fn apply(&self, state: &str, action: &str) -> Outcome<BlackjackTurn> {
        let parsed = match BlackjackState::parse(state) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "rejected blackjack state");
                return Outcome::rejected(state, err);
            }
        };

        match self.play(&parsed, action) {
            Ok(next) => {
                if next.status == Status::GameOver {
                    debug!(results = ?next.results, "blackjack round finished");
                }
                Outcome::Applied(BlackjackTurn::from(&next))
            }
            Err(err) => {
                debug!(error = %err, action, "rejected blackjack action");
                Outcome::rejected(state, err)
            }
        }
    }
}
