//! Stateless rule engines for turn-based games.
//!
//! Every game is carried between calls as a compact `KEY:value|...` state
//! string (chess uses FEN, checkers its own board text). An engine parses the
//! string, checks one action, and returns either the next state or a
//! [`Rejection`] that echoes the input untouched. Nothing is stored between
//! calls.
//!
//! Blackjack hides the shoe and the dealer's hole card behind
//! [`PublicStateCodec`], which seals the full state in an encrypted token.
//!
//! # Example
//!
//! ```
//! use turnstate::{Outcome, four_in_a_row};
//!
//! let state = four_in_a_row::new_game();
//! let Outcome::Applied(turn) = four_in_a_row::apply_move(&state, 4) else {
//!     panic!("column 4 is open");
//! };
//! assert_eq!(turn.last_action, "4");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod blackjack;
pub mod card;
pub mod checkers;
pub mod chess;
pub mod codec;
pub mod config;
pub mod dice;
pub mod error;
pub mod four_in_a_row;
pub mod hand;
pub mod mancala;
pub mod options;
pub mod outcome;
pub mod result;
pub mod sea_battle;
pub mod slot;
pub mod tic_tac_toe;

// Re-export main types
pub use blackjack::{
    Blackjack, BlackjackAction, BlackjackState, BlackjackTurn, PublicStateCodec, Turn, Wager,
};
pub use card::{Card, DECK_SIZE, Suit};
pub use codec::{GameKind, MAX_CHIPS, Seat, Status, Token, Winner};
pub use config::{KeyOrigin, STATE_KEY_ENV, StateKey, StateKeyConfig};
pub use error::{ActionError, Error, KeyError, StateError, TokenError};
pub use hand::{DealerHand, Hand, HandStatus, HandValue, hand_value};
pub use options::{GameOptions, RoundingMode};
pub use outcome::{Outcome, Rejection};
pub use result::{HandOutcome, HandResult, RoundResult};
