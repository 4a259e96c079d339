//! Eight-by-eight checkers with forced capture.
//!
//! State text is `<rows> <turn>`: eight `/`-separated rows of `.`, `w`, `W`,
//! `b`, `B` (lowercase men, uppercase kings), a space, then `w` or `b`.
//! Row 0 is rank 8. White moves up the board toward row 0, black down
//! toward row 7. Moves are the visited squares concatenated, e.g. `c3d4` or
//! `c3e5g7`.

use core::fmt;
use core::str::FromStr;

use tracing::debug;

use crate::codec::{
    GameKind, OPPONENT_MOVE_CAP, Status, Symbol, Token, cap_candidates, parse_grid, write_grid,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

mod moves;

pub use moves::MoveSet;

const GAME: GameKind = GameKind::Checkers;
const FILES: &str = "abcdefgh";

/// Board side length.
pub const BOARD_SIZE: usize = 8;

/// The checkers board, indexed `[row][col]`.
pub type Board = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// A side in checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Moves first, toward row 0.
    White,
    /// Moves second, toward row 7.
    Black,
}

impl Color {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row on which this side's men are crowned.
    const fn crown_row(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }
}

impl Token for Color {
    fn token(self) -> &'static str {
        match self {
            Self::White => "w",
            Self::Black => "b",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "w" => Some(Self::White),
            "b" => Some(Self::Black),
            _ => None,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// An uncrowned piece.
    Man(Color),
    /// A crowned piece, moving in all four diagonal directions.
    King(Color),
}

impl Cell {
    /// Returns the owner of the piece, if any.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Man(color) | Self::King(color) => Some(color),
        }
    }

    /// Returns whether the square holds a king.
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Self::King(_))
    }

    /// Returns the piece as it stands after landing on `row`.
    #[must_use]
    pub const fn crowned_on(self, row: usize) -> Self {
        match self {
            Self::Man(color) if row == color.crown_row() => Self::King(color),
            other => other,
        }
    }
}

impl Symbol for Cell {
    fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Man(Color::White) => 'w',
            Self::King(Color::White) => 'W',
            Self::Man(Color::Black) => 'b',
            Self::King(Color::Black) => 'B',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'w' => Some(Self::Man(Color::White)),
            'W' => Some(Self::King(Color::White)),
            'b' => Some(Self::Man(Color::Black)),
            'B' => Some(Self::King(Color::Black)),
            _ => None,
        }
    }
}

/// A board square, written as file `a`-`h` plus rank `1`-`8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    /// Creates a square from board indices, or `None` when off the board.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row index; 0 is rank 8.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Column index; 0 is file `a`.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns whether pieces may stand here.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.col + (BOARD_SIZE - 1 - self.row)) % 2 == 0
    }

    /// Returns the square `dr` rows and `dc` columns away, if on the board.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Self::new(
            self.row.checked_add_signed(dr)?,
            self.col.checked_add_signed(dc)?,
        )
    }

    /// Parses a square such as `c3`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        let col = FILES.find(file)?;
        let rank = rank.to_digit(10)? as usize;
        if !(1..=BOARD_SIZE).contains(&rank) {
            return None;
        }
        Self::new(BOARD_SIZE - rank, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = FILES.as_bytes().get(self.col).copied().map_or('?', char::from);
        write!(f, "{file}{}", BOARD_SIZE - self.row)
    }
}

/// A checkers position: the board and the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersState {
    /// Squares, indexed `[row][col]`.
    pub board: Board,
    /// Side to move.
    pub turn: Color,
}

impl CheckersState {
    /// Parses `<rows> <turn>`.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let (rows, turn) = text.trim().split_once(' ').ok_or(StateError::Empty(GAME))?;
        let board = parse_grid::<Cell, BOARD_SIZE, BOARD_SIZE>(GAME, rows)?;
        let turn = Color::from_token(turn).ok_or(StateError::Turn(GAME))?;
        Ok(Self { board, turn })
    }

    /// Returns the piece on `square`.
    #[must_use]
    pub const fn at(&self, square: Square) -> Cell {
        self.board[square.row][square.col]
    }

    /// Returns whether `color` has any piece left.
    #[must_use]
    pub fn has_pieces(&self, color: Color) -> bool {
        self.board
            .iter()
            .flatten()
            .any(|cell| cell.color() == Some(color))
    }

    /// Returns the legal moves for the side to move, sorted.
    ///
    /// When any capture exists only captures are returned.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<String> {
        self.all_moves().into_legal()
    }

    /// Plays a move known to be legal and returns the resulting position.
    fn play(&self, squares: &[Square]) -> Self {
        let mut board = self.board;
        let Some((&start, path)) = squares.split_first() else {
            return self.clone();
        };
        let piece = board[start.row][start.col];
        board[start.row][start.col] = Cell::Empty;

        let mut at = start;
        for &next in path {
            if next.row.abs_diff(at.row) == 2 && next.col.abs_diff(at.col) == 2 {
                board[(at.row + next.row) / 2][(at.col + next.col) / 2] = Cell::Empty;
            }
            at = next;
        }
        board[at.row][at.col] = piece.crowned_on(at.row);

        Self {
            board,
            turn: self.turn.opponent(),
        }
    }
}

impl Default for CheckersState {
    /// The opening position: black men on rows 0-2, white men on rows 5-7,
    /// dark squares only, white to move.
    fn default() -> Self {
        let mut board = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in board.iter_mut().enumerate() {
            let man = match row {
                0..=2 => Cell::Man(Color::Black),
                5..=7 => Cell::Man(Color::White),
                _ => continue,
            };
            for (col, cell) in cells.iter_mut().enumerate() {
                if (Square { row, col }).is_dark() {
                    *cell = man;
                }
            }
        }
        Self {
            board,
            turn: Color::White,
        }
    }
}

impl FromStr for CheckersState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CheckersState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", write_grid(&self.board), self.turn.token())
    }
}

/// Summary of one applied checkers move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersTurn {
    /// The new state string.
    pub state: String,
    /// Game status after the move.
    pub status: Status,
    /// Side to move next.
    pub turn: Color,
    /// The move that was applied.
    pub last_move: String,
    /// The side that moved, when the move ended the game.
    pub winner: Option<Color>,
}

/// Returns the opening position as a state string.
#[must_use]
pub fn new_game() -> String {
    CheckersState::default().to_string()
}

/// Returns the legal moves for a state string, sorted.
///
/// # Errors
///
/// Returns a [`StateError`] for malformed state.
pub fn legal_moves(state: &str) -> Result<Vec<String>, StateError> {
    Ok(CheckersState::parse(state)?.legal_moves())
}

/// Returns captures and simple moves separately, before the forced-capture
/// rule filters them.
///
/// # Errors
///
/// Returns a [`StateError`] for malformed state.
pub fn all_moves(state: &str) -> Result<MoveSet, StateError> {
    Ok(CheckersState::parse(state)?.all_moves())
}

/// Returns up to `limit` legal moves for the side to move (`0` for all).
///
/// # Errors
///
/// Returns a [`StateError`] for malformed state.
pub fn opponent_candidates(state: &str, limit: usize) -> Result<Vec<String>, StateError> {
    Ok(cap_candidates(legal_moves(state)?, limit))
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
///
/// # Errors
///
/// Returns a [`StateError`] for malformed state.
pub fn default_opponent_candidates(state: &str) -> Result<Vec<String>, StateError> {
    opponent_candidates(state, OPPONENT_MOVE_CAP)
}

/// Applies `mv` to `state`.
///
/// The move must be one of [`legal_moves`]. After it, the game is over when
/// the side to move has no pieces or no legal move, and the mover wins.
#[must_use]
pub fn apply_move(state: &str, mv: &str) -> Outcome<CheckersTurn> {
    let position = match CheckersState::parse(state) {
        Ok(position) => position,
        Err(err) => {
            debug!(error = %err, "rejected checkers state");
            return Outcome::rejected(state, err);
        }
    };

    let mv = mv.trim().to_ascii_lowercase();
    if !position.legal_moves().contains(&mv) {
        debug!(mv, "rejected checkers move");
        return Outcome::rejected(state, ActionError::IllegalMove);
    }
    let Some(squares) = parse_path(&mv) else {
        return Outcome::rejected(state, ActionError::MoveFormat);
    };

    let next = position.play(&squares);
    let mover = position.turn;
    let finished = !next.has_pieces(next.turn) || next.legal_moves().is_empty();
    if finished {
        debug!(winner = mover.token(), "checkers game over");
    }

    Outcome::Applied(CheckersTurn {
        state: next.to_string(),
        status: if finished {
            Status::GameOver
        } else {
            Status::InProgress
        },
        turn: next.turn,
        last_move: mv,
        winner: finished.then_some(mover),
    })
}

/// Splits a move into its squares; at least two are required.
fn parse_path(mv: &str) -> Option<Vec<Square>> {
    if mv.len() < 4 || mv.len() % 2 != 0 || !mv.is_ascii() {
        return None;
    }
    (0..mv.len())
        .step_by(2)
        .map(|start| Square::parse(&mv[start..start + 2]))
        .collect()
}
