//! Six-by-seven four-in-a-row.
//!
//! State: `G:<grid>|T:<turn>|ST:<status>|LA:<column>|W:<winner>`. Row 0 is
//! the top of the board; tokens fall to the highest-numbered empty row. The
//! player drops `R`, the opponent `Y`.

use core::fmt;
use core::str::FromStr;

use tracing::debug;

use crate::codec::{
    GameKind, OPPONENT_MOVE_CAP, Seat, Segments, Status, Symbol, Token, Winner, cap_candidates,
    parse_grid, parse_winner, text_or_dash, winner_token, write_grid,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

const GAME: GameKind = GameKind::FourInARow;

/// Rows on the board.
pub const ROWS: usize = 6;
/// Columns on the board, numbered `1..=COLS` by callers.
pub const COLS: usize = 7;

const RUN: usize = 4;
const LINES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disc {
    /// Empty.
    #[default]
    Empty,
    /// The player's disc.
    Red,
    /// The opponent's disc.
    Yellow,
}

impl Disc {
    const fn of(seat: Seat) -> Self {
        match seat {
            Seat::Player => Self::Red,
            Seat::Opponent => Self::Yellow,
        }
    }
}

impl Symbol for Disc {
    fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Red => 'R',
            Self::Yellow => 'Y',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'R' => Some(Self::Red),
            'Y' => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// A four-in-a-row game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FourInARowState {
    /// Cells, indexed `[row][col]`, row 0 on top.
    pub grid: [[Disc; COLS]; ROWS],
    /// Seat to move; unchanged once the game ends.
    pub turn: Seat,
    /// Game status.
    pub status: Status,
    /// Last column played, as text.
    pub last_action: Option<String>,
    /// Result once the game ends.
    pub winner: Option<Winner<Seat>>,
}

impl Default for FourInARowState {
    fn default() -> Self {
        Self {
            grid: [[Disc::Empty; COLS]; ROWS],
            turn: Seat::Player,
            status: Status::InProgress,
            last_action: None,
            winner: None,
        }
    }
}

impl FourInARowState {
    /// Parses a state string.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;
        Ok(Self {
            grid: parse_grid::<Disc, ROWS, COLS>(GAME, segments.require("G")?)?,
            turn: segments.token_or("T", Seat::Player, StateError::Turn(GAME))?,
            status: segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?,
            last_action: segments.text("LA"),
            winner: segments
                .get_non_empty("W")
                .map_or(Ok(None), |raw| parse_winner(GAME, raw))?,
        })
    }

    /// Row a disc dropped into `col` would land on.
    fn drop_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.grid[row][col] == Disc::Empty)
    }

    /// Returns the columns (1-based) that still have room.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<u8> {
        (0..COLS)
            .filter(|&col| self.drop_row(col).is_some())
            .map(|col| col as u8 + 1)
            .collect()
    }

    /// Drops the side to move's disc into `column` (1-based).
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the game is over, the column is out of
    /// range, or the column is full.
    pub fn play(&self, column: u8) -> Result<Self, ActionError> {
        if self.status != Status::InProgress {
            return Err(ActionError::GameOver);
        }
        if !(1..=COLS).contains(&usize::from(column)) {
            return Err(ActionError::InvalidColumn);
        }
        let col = usize::from(column) - 1;
        let row = self.drop_row(col).ok_or(ActionError::ColumnFull)?;

        let disc = Disc::of(self.turn);
        let mut next = self.clone();
        next.grid[row][col] = disc;
        next.last_action = Some(column.to_string());

        if next.completes_run(row, col, disc) {
            next.status = Status::GameOver;
            next.winner = Some(Winner::Side(self.turn));
        } else if next.grid.iter().flatten().all(|cell| *cell != Disc::Empty) {
            next.status = Status::GameOver;
            next.winner = Some(Winner::Draw);
        } else {
            next.turn = self.turn.other();
        }
        Ok(next)
    }

    fn completes_run(&self, row: usize, col: usize, disc: Disc) -> bool {
        LINES.iter().any(|&(dr, dc)| {
            1 + self.count_from(row, col, dr, dc, disc) + self.count_from(row, col, -dr, -dc, disc)
                >= RUN
        })
    }

    /// Counts consecutive `disc` cells stepping away from `(row, col)`.
    fn count_from(&self, row: usize, col: usize, dr: isize, dc: isize, disc: Disc) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row, col);
        loop {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                break;
            };
            if nr >= ROWS || nc >= COLS || self.grid[nr][nc] != disc {
                break;
            }
            count += 1;
            (r, c) = (nr, nc);
        }
        count
    }
}

impl FromStr for FourInARowState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FourInARowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G:{}|T:{}|ST:{}|LA:{}|W:{}",
            write_grid(&self.grid),
            self.turn.token(),
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
            winner_token(self.winner),
        )
    }
}

/// Summary of one applied drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FourInARowTurn {
    /// The new state string.
    pub state: String,
    /// Game status after the drop.
    pub status: Status,
    /// Seat to move next.
    pub turn: Seat,
    /// The column played.
    pub last_action: String,
    /// Result, when the drop ended the game.
    pub winner: Option<Winner<Seat>>,
}

/// Returns an empty board with the player to move.
#[must_use]
pub fn new_game() -> String {
    FourInARowState::default().to_string()
}

/// Drops a disc for the side to move into `column` (1-based).
#[must_use]
pub fn apply_move(state: &str, column: u8) -> Outcome<FourInARowTurn> {
    let board = match FourInARowState::parse(state) {
        Ok(board) => board,
        Err(err) => {
            debug!(error = %err, "rejected four-in-a-row state");
            return Outcome::rejected(state, err);
        }
    };
    match board.play(column) {
        Ok(next) => Outcome::Applied(FourInARowTurn {
            state: next.to_string(),
            status: next.status,
            turn: next.turn,
            last_action: column.to_string(),
            winner: next.winner,
        }),
        Err(err) => {
            debug!(error = %err, column, "rejected four-in-a-row move");
            Outcome::rejected(state, err)
        }
    }
}

/// Returns the open columns; malformed state yields an empty list.
#[must_use]
pub fn legal_moves(state: &str) -> Vec<u8> {
    FourInARowState::parse(state).map_or_else(|_| Vec::new(), |board| board.legal_moves())
}

/// Returns up to `limit` open columns (`0` for all).
#[must_use]
pub fn opponent_candidates(state: &str, limit: usize) -> Vec<u8> {
    cap_candidates(legal_moves(state), limit)
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
#[must_use]
pub fn default_opponent_candidates(state: &str) -> Vec<u8> {
    opponent_candidates(state, OPPONENT_MOVE_CAP)
}
