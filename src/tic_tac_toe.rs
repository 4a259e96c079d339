//! Three-by-three tic-tac-toe.
//!
//! State: `G:<grid>|T:<turn>|ST:<status>|LA:<last>|W:<winner>|P:<sym>|O:<sym>`.
//! Squares are `A1`..`C3`: the letter picks the column, the digit is the
//! row index plus one.

use core::fmt;
use core::str::FromStr;

use tracing::debug;

use crate::codec::{
    GameKind, OPPONENT_MOVE_CAP, Seat, Segments, Status, Symbol, Token, Winner, cap_candidates,
    parse_grid, parse_winner, text_or_dash, winner_token, write_grid,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

const GAME: GameKind = GameKind::TicTacToe;
const SIZE: usize = 3;
const FILES: &str = "ABC";

/// A mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// `X`.
    X,
    /// `O`.
    O,
}

impl Mark {
    /// Returns the other mark.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Parses a mark, ignoring case.
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "X" => Some(Self::X),
            "O" => Some(Self::O),
            _ => None,
        }
    }
}

/// A square: empty or holding a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(pub Option<Mark>);

impl Symbol for Cell {
    fn symbol(self) -> char {
        match self.0 {
            None => '.',
            Some(Mark::X) => 'X',
            Some(Mark::O) => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self(None)),
            'X' => Some(Self(Some(Mark::X))),
            'O' => Some(Self(Some(Mark::O))),
            _ => None,
        }
    }
}

/// A tic-tac-toe game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeState {
    /// Squares, indexed `[row][col]`.
    pub grid: [[Cell; SIZE]; SIZE],
    /// Seat to move; unchanged once the game ends.
    pub turn: Seat,
    /// Game status.
    pub status: Status,
    /// Last square played, uppercase.
    pub last_action: Option<String>,
    /// Result once the game ends.
    pub winner: Option<Winner<Seat>>,
    /// The player's mark.
    pub player: Mark,
    /// The opponent's mark.
    pub opponent: Mark,
}

impl TicTacToeState {
    /// Creates an empty board with the player using `player` and moving first.
    #[must_use]
    pub const fn new(player: Mark) -> Self {
        Self {
            grid: [[Cell(None); SIZE]; SIZE],
            turn: Seat::Player,
            status: Status::InProgress,
            last_action: None,
            winner: None,
            player,
            opponent: player.other(),
        }
    }

    /// Parses a state string.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;
        let grid = parse_grid::<Cell, SIZE, SIZE>(GAME, segments.require("G")?)?;
        let turn = segments.token_or("T", Seat::Player, StateError::Turn(GAME))?;
        let status = segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?;
        let winner = segments
            .get_non_empty("W")
            .map_or(Ok(None), |raw| parse_winner(GAME, raw))?;

        let player = match segments.get_non_empty("P") {
            Some(raw) => Mark::parse(raw).ok_or(StateError::Symbol(GAME))?,
            None => Mark::X,
        };
        let opponent = match segments.get_non_empty("O") {
            Some(raw) => Mark::parse(raw).ok_or(StateError::Symbol(GAME))?,
            None => player.other(),
        };
        if player == opponent {
            return Err(StateError::Symbol(GAME));
        }

        Ok(Self {
            grid,
            turn,
            status,
            last_action: segments.text("LA"),
            winner,
            player,
            opponent,
        })
    }

    /// Returns the mark played by `seat`.
    #[must_use]
    pub const fn mark_of(&self, seat: Seat) -> Mark {
        match seat {
            Seat::Player => self.player,
            Seat::Opponent => self.opponent,
        }
    }

    /// Returns the empty squares in row order (`A1`, `B1`, `C1`, `A2`, ...).
    #[must_use]
    pub fn legal_moves(&self) -> Vec<String> {
        let mut moves = Vec::new();
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.0.is_none() {
                    moves.push(square_name(row, col));
                }
            }
        }
        moves
    }

    /// Places the side to move's mark on `square`.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the game is over, the square is
    /// malformed, or the square is taken.
    pub fn play(&self, square: &str) -> Result<Self, ActionError> {
        if self.status != Status::InProgress {
            return Err(ActionError::GameOver);
        }
        let (row, col) = parse_square(square)?;
        if self.grid[row][col].0.is_some() {
            return Err(ActionError::Occupied);
        }

        let mark = self.mark_of(self.turn);
        let mut next = self.clone();
        next.grid[row][col] = Cell(Some(mark));
        next.last_action = Some(square.trim().to_ascii_uppercase());

        if next.has_line(mark) {
            next.status = Status::GameOver;
            next.winner = Some(Winner::Side(self.turn));
        } else if next.is_full() {
            next.status = Status::GameOver;
            next.winner = Some(Winner::Draw);
        } else {
            next.turn = self.turn.other();
        }
        Ok(next)
    }

    fn has_line(&self, mark: Mark) -> bool {
        let owns = |row: usize, col: usize| self.grid[row][col].0 == Some(mark);
        (0..SIZE).any(|row| (0..SIZE).all(|col| owns(row, col)))
            || (0..SIZE).any(|col| (0..SIZE).all(|row| owns(row, col)))
            || (0..SIZE).all(|i| owns(i, i))
            || (0..SIZE).all(|i| owns(i, SIZE - 1 - i))
    }

    fn is_full(&self) -> bool {
        self.grid.iter().flatten().all(|cell| cell.0.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

impl FromStr for TicTacToeState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G:{}|T:{}|ST:{}|LA:{}|W:{}|P:{}|O:{}",
            write_grid(&self.grid),
            self.turn.token(),
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
            winner_token(self.winner),
            Cell(Some(self.player)).symbol(),
            Cell(Some(self.opponent)).symbol(),
        )
    }
}

fn square_name(row: usize, col: usize) -> String {
    let file = FILES.as_bytes().get(col).copied().map_or('?', char::from);
    format!("{file}{}", row + 1)
}

fn parse_square(square: &str) -> Result<(usize, usize), ActionError> {
    let cleaned = square.trim().to_ascii_uppercase();
    let mut chars = cleaned.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ActionError::CoordinateFormat);
    };
    let col = FILES.find(file).ok_or(ActionError::CoordinateFile)?;
    let row = match rank {
        '1'..='3' => rank as usize - '1' as usize,
        _ => return Err(ActionError::CoordinateRank),
    };
    Ok((row, col))
}

/// Summary of one applied tic-tac-toe move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeTurn {
    /// The new state string.
    pub state: String,
    /// Game status after the move.
    pub status: Status,
    /// Seat to move next.
    pub turn: Seat,
    /// The square played, uppercase.
    pub last_action: String,
    /// Result, when the move ended the game.
    pub winner: Option<Winner<Seat>>,
}

/// Returns an empty board with the player using `player`.
#[must_use]
pub fn new_game(player: Mark) -> String {
    TicTacToeState::new(player).to_string()
}

/// Returns an empty board, reading the player's mark from text (`X` when
/// blank).
///
/// # Errors
///
/// Returns [`StateError::Symbol`] for anything but `X` or `O`.
pub fn new_game_with_symbol(symbol: &str) -> Result<String, StateError> {
    if symbol.trim().is_empty() {
        return Ok(new_game(Mark::X));
    }
    Mark::parse(symbol)
        .map(new_game)
        .ok_or(StateError::Symbol(GAME))
}

/// Places a mark for the side to move.
#[must_use]
pub fn apply_move(state: &str, square: &str) -> Outcome<TicTacToeTurn> {
    let board = match TicTacToeState::parse(state) {
        Ok(board) => board,
        Err(err) => {
            debug!(error = %err, "rejected tic-tac-toe state");
            return Outcome::rejected(state, err);
        }
    };
    match board.play(square) {
        Ok(next) => Outcome::Applied(TicTacToeTurn {
            state: next.to_string(),
            status: next.status,
            turn: next.turn,
            last_action: next.last_action.clone().unwrap_or_default(),
            winner: next.winner,
        }),
        Err(err) => {
            debug!(error = %err, square, "rejected tic-tac-toe move");
            Outcome::rejected(state, err)
        }
    }
}

/// Returns the empty squares; malformed state yields an empty list.
#[must_use]
pub fn legal_moves(state: &str) -> Vec<String> {
    TicTacToeState::parse(state).map_or_else(|_| Vec::new(), |board| board.legal_moves())
}

/// Returns up to `limit` empty squares (`0` for all).
#[must_use]
pub fn opponent_candidates(state: &str, limit: usize) -> Vec<String> {
    cap_candidates(legal_moves(state), limit)
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
#[must_use]
pub fn default_opponent_candidates(state: &str) -> Vec<String> {
    opponent_candidates(state, OPPONENT_MOVE_CAP)
}
