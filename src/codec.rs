//! Shared pieces of the `KEY:value` state encoding.
//!
//! Every game serializes to `|`-separated segments. Grids are `/`-separated
//! rows of single-character cells, lists are comma-separated with `-` for
//! empty, and closed enumerations are written as fixed lowercase tokens.

use core::fmt;

use crate::error::StateError;

/// Placeholder written for an empty list or an absent value.
pub const EMPTY_FIELD: &str = "-";

/// Default cap applied to opponent candidate lists.
pub const OPPONENT_MOVE_CAP: usize = 200;

/// Largest bankroll, bet, or payout a state may carry.
///
/// Settling four doubled hands at this size still fits in an `i64`.
pub const MAX_CHIPS: u64 = 1 << 48;

/// The games served by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// Chess (legality delegated to `shakmaty`).
    Chess,
    /// Eight-by-eight checkers with forced capture.
    Checkers,
    /// Single-seat blackjack against the dealer.
    Blackjack,
    /// Three-by-three tic-tac-toe.
    TicTacToe,
    /// Six-by-seven four-in-a-row.
    FourInARow,
    /// Six-pit mancala.
    Mancala,
    /// Ten-by-ten sea battle.
    SeaBattle,
    /// Three-reel slot machine.
    Slot,
    /// Polyhedral dice.
    Dice,
}

impl GameKind {
    /// Human-readable game name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chess => "chess",
            Self::Checkers => "checkers",
            Self::Blackjack => "blackjack",
            Self::TicTacToe => "tic-tac-toe",
            Self::FourInARow => "four-in-a-row",
            Self::Mancala => "mancala",
            Self::SeaBattle => "sea battle",
            Self::Slot => "slot",
            Self::Dice => "dice",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A closed enumeration with a fixed textual token per variant.
pub trait Token: Copy + Sized {
    /// Returns the token written to state strings.
    fn token(self) -> &'static str;

    /// Parses a token, returning `None` for anything outside the set.
    fn from_token(raw: &str) -> Option<Self>;
}

/// A grid cell with a closed single-character alphabet.
pub trait Symbol: Copy + Sized {
    /// Returns the character written to state strings.
    fn symbol(self) -> char;

    /// Parses a character, returning `None` for anything outside the alphabet.
    fn from_symbol(symbol: char) -> Option<Self>;
}

/// Whether a game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The game has ended.
    GameOver,
}

impl Token for Status {
    fn token(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::GameOver => "game_over",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "in_progress" => Some(Self::InProgress),
            "game_over" => Some(Self::GameOver),
            _ => None,
        }
    }
}

/// First or second mover in the two-seat games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seat {
    /// The first mover (the human player).
    #[default]
    Player,
    /// The second mover (the caller-driven opponent).
    Opponent,
}

impl Seat {
    /// Returns the other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

impl Token for Seat {
    fn token(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Opponent => "opponent",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "player" => Some(Self::Player),
            "opponent" => Some(Self::Opponent),
            _ => None,
        }
    }
}

/// Final verdict of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner<S> {
    /// One side won.
    Side(S),
    /// Nobody won.
    Draw,
}

/// Writes an optional winner as its token, `draw`, or `-`.
#[must_use]
pub fn winner_token<S: Token>(winner: Option<Winner<S>>) -> &'static str {
    match winner {
        None => EMPTY_FIELD,
        Some(Winner::Draw) => "draw",
        Some(Winner::Side(side)) => side.token(),
    }
}

/// Parses an optional winner written by [`winner_token`].
///
/// # Errors
///
/// Returns [`StateError::Winner`] for any other value.
pub fn parse_winner<S: Token>(game: GameKind, raw: &str) -> Result<Option<Winner<S>>, StateError> {
    match raw {
        EMPTY_FIELD => Ok(None),
        "draw" => Ok(Some(Winner::Draw)),
        other => S::from_token(other)
            .map(|side| Some(Winner::Side(side)))
            .ok_or(StateError::Winner(game)),
    }
}

/// The `KEY:value` segments of one state string.
///
/// When a key repeats, the last occurrence wins.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    game: GameKind,
    parts: Vec<(&'a str, &'a str)>,
}

impl<'a> Segments<'a> {
    /// Splits a state string into segments.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Empty`] for blank input and
    /// [`StateError::Segment`] when a chunk has no `:`.
    pub fn parse(game: GameKind, text: &'a str) -> Result<Self, StateError> {
        if text.trim().is_empty() {
            return Err(StateError::Empty(game));
        }

        let parts = text
            .split('|')
            .map(|chunk| chunk.split_once(':').ok_or(StateError::Segment(game)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { game, parts })
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.parts
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    /// Returns the value stored under `key`, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&'a str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingSegment`] when the key is absent.
    pub fn require(&self, key: &'static str) -> Result<&'a str, StateError> {
        self.get(key).ok_or(StateError::MissingSegment {
            game: self.game,
            key,
        })
    }

    /// Parses a token segment, falling back to `default` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `error` when the value is present but not a valid token.
    pub fn token_or<T: Token>(&self, key: &str, default: T, error: StateError) -> Result<T, StateError> {
        self.get_non_empty(key)
            .map_or(Ok(default), |raw| T::from_token(raw).ok_or(error))
    }

    /// Returns the free-text segment under `key`, or `None` for `-`/absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get_non_empty(key)
            .filter(|value| *value != EMPTY_FIELD)
            .map(str::to_owned)
    }
}

/// Parses a `/`-separated grid of exactly `R` rows of `C` cells.
///
/// # Errors
///
/// Returns [`StateError::Rows`], [`StateError::RowLength`], or
/// [`StateError::Cell`] for the corresponding malformation.
pub fn parse_grid<T, const R: usize, const C: usize>(
    game: GameKind,
    raw: &str,
) -> Result<[[T; C]; R], StateError>
where
    T: Symbol + Default,
{
    if raw.is_empty() {
        return Err(StateError::Rows(game));
    }
    let rows: Vec<&str> = raw.split('/').collect();
    if rows.len() != R {
        return Err(StateError::Rows(game));
    }

    let mut grid = [[T::default(); C]; R];
    for (target, row) in grid.iter_mut().zip(rows) {
        if row.chars().count() != C {
            return Err(StateError::RowLength(game));
        }
        for (cell, symbol) in target.iter_mut().zip(row.chars()) {
            *cell = T::from_symbol(symbol).ok_or(StateError::Cell(game))?;
        }
    }
    Ok(grid)
}

/// Writes a grid as `/`-separated rows.
#[must_use]
pub fn write_grid<T: Symbol, const R: usize, const C: usize>(grid: &[[T; C]; R]) -> String {
    grid.iter()
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits a comma-separated list; `-` and empty input yield no items.
#[must_use]
pub fn parse_list(raw: Option<&str>) -> Vec<&str> {
    match raw {
        None | Some("" | EMPTY_FIELD) => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect(),
    }
}

/// Joins items with commas, writing `-` for an empty list.
#[must_use]
pub fn write_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        EMPTY_FIELD.to_owned()
    } else {
        joined
    }
}

/// Parses a non-negative integer field.
///
/// # Errors
///
/// Returns [`StateError::Number`] naming `field` when parsing fails.
pub fn parse_count(game: GameKind, field: &'static str, raw: &str) -> Result<u64, StateError> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StateError::Number { game, field });
    }
    raw.parse().map_err(|_| StateError::Number { game, field })
}

/// Parses a chip amount no larger than [`MAX_CHIPS`].
///
/// # Errors
///
/// Returns [`StateError::Number`] naming `field` for malformed or oversized
/// amounts.
pub fn parse_chips(game: GameKind, field: &'static str, raw: &str) -> Result<u64, StateError> {
    match parse_count(game, field, raw)? {
        amount if amount <= MAX_CHIPS => Ok(amount),
        _ => Err(StateError::Number { game, field }),
    }
}

/// Writes optional free text, using `-` when absent.
#[must_use]
pub fn text_or_dash(text: Option<&str>) -> &str {
    text.unwrap_or(EMPTY_FIELD)
}

/// Truncates a candidate list to at most `limit` entries.
///
/// A `limit` of zero leaves the list untouched.
#[must_use]
pub fn cap_candidates<T>(mut candidates: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        candidates.truncate(limit);
    }
    candidates
}
