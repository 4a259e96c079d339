//! Error types for state decoding, action validation, and state tokens.

use thiserror::Error;

use crate::codec::GameKind;

/// Errors raised while decoding a state string.
///
/// Every variant names the game whose codec rejected the input, and every
/// failure class has its own stable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The state string is empty or blank.
    #[error("invalid {0} state string")]
    Empty(GameKind),
    /// A `KEY:value` segment has no `:`.
    #[error("invalid {0} state segment")]
    Segment(GameKind),
    /// A required segment is absent.
    #[error("missing {key} segment in {game} state")]
    MissingSegment {
        /// Game being decoded.
        game: GameKind,
        /// Segment key that was expected.
        key: &'static str,
    },
    /// A grid has the wrong number of rows.
    #[error("invalid {0} state rows")]
    Rows(GameKind),
    /// A grid row has the wrong number of cells.
    #[error("invalid {0} state row length")]
    RowLength(GameKind),
    /// A grid cell is outside the game's alphabet.
    #[error("invalid {0} state cell")]
    Cell(GameKind),
    /// The turn value is not one of the game's sides.
    #[error("invalid {0} turn")]
    Turn(GameKind),
    /// The status value is not `in_progress` or `game_over`.
    #[error("invalid {0} status")]
    Status(GameKind),
    /// The winner value is not a side, `draw`, or `-`.
    #[error("invalid {0} winner")]
    Winner(GameKind),
    /// A numeric field is not a non-negative integer.
    #[error("invalid {game} {field}")]
    Number {
        /// Game being decoded.
        game: GameKind,
        /// Field that failed to parse.
        field: &'static str,
    },
    /// A pit list does not have six entries.
    #[error("invalid {0} pit count")]
    PitCount(GameKind),
    /// A player symbol is not `X` or `O`, or both players share one.
    #[error("invalid {0} player symbol")]
    Symbol(GameKind),
    /// A card is not a rank from `A23456789TJQK` followed by a suit from `SHDC`.
    #[error("invalid card in {0} state")]
    Card(GameKind),
    /// A blackjack hand is not a `cards@status@doubled` triple.
    #[error("invalid {0} hand format")]
    HandFormat(GameKind),
    /// A blackjack hand status is not a known label.
    #[error("invalid {0} hand status")]
    HandStatus(GameKind),
    /// A blackjack result is not a known verdict.
    #[error("invalid {0} result")]
    Verdict(GameKind),
    /// A slot reel symbol is not on the reel strip.
    #[error("invalid {0} reel symbol")]
    Reel(GameKind),
    /// A FEN string failed validation or parsing.
    #[error("invalid FEN: {0}")]
    Fen(String),
}

/// Errors raised when an action is well-formed but not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game has already finished.
    #[error("game is already over")]
    GameOver,
    /// The action text is empty or not recognised.
    #[error("invalid action")]
    InvalidAction,
    /// The move or action is not in the legal set.
    #[error("illegal move")]
    IllegalMove,
    /// The action is not allowed for the current hand or turn.
    #[error("illegal action")]
    IllegalAction,
    /// The move notation cannot be parsed.
    #[error("invalid move format")]
    MoveFormat,
    /// A coordinate cannot be parsed.
    #[error("invalid coordinate format")]
    CoordinateFormat,
    /// A coordinate file is out of range.
    #[error("invalid coordinate file")]
    CoordinateFile,
    /// A coordinate rank is out of range.
    #[error("invalid coordinate rank")]
    CoordinateRank,
    /// The target square already holds a mark.
    #[error("square is already occupied")]
    Occupied,
    /// The column number is outside `1..=7`.
    #[error("invalid column")]
    InvalidColumn,
    /// The column has no empty cell left.
    #[error("column is full")]
    ColumnFull,
    /// The pit number is outside `1..=6`.
    #[error("invalid pit")]
    InvalidPit,
    /// The chosen pit holds no seeds.
    #[error("chosen pit is empty")]
    EmptyPit,
    /// The coordinate was already fired on by this side.
    #[error("coordinate already targeted")]
    AlreadyTargeted,
    /// No cards remain in the shoe.
    #[error("the shoe is empty")]
    EmptyShoe,
    /// The bankroll cannot cover the stake.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// The stack is zero.
    #[error("stack must be positive")]
    StackNotPositive,
    /// The bet is zero.
    #[error("bet must be positive")]
    BetNotPositive,
    /// The bet is larger than the stack.
    #[error("bet cannot exceed stack")]
    BetExceedsStack,
    /// The die has an unsupported number of sides.
    #[error("unsupported dice sides")]
    DiceSides,
    /// The dice count is outside `1..=100`.
    #[error("invalid dice count")]
    DiceCount,
    /// A chip or seed amount is beyond what a state may carry.
    #[error("amount out of range")]
    AmountOutOfRange,
    /// A chosen opponent move is not in the offered candidate list.
    #[error("opponent move not in allowed list")]
    NotOffered,
}

/// Errors raised by the encrypted public-state channel.
///
/// Deliberately a single variant: callers learn that the token was rejected,
/// not which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is missing, tampered with, from another key, or malformed.
    #[error("invalid blackjack state token")]
    Invalid,
}

/// Errors raised while resolving the state-token key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The configured key is not base64url text decoding to 32 bytes.
    #[error("invalid BLACKJACK_STATE_KEY; expected a urlsafe-base64 32-byte key")]
    InvalidKey,
}

/// Any error an engine call can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed state.
    #[error(transparent)]
    State(#[from] StateError),
    /// Illegal action.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Rejected state token.
    #[error(transparent)]
    Token(#[from] TokenError),
}
