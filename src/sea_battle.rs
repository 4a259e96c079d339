//! Ten-by-ten sea battle against a caller-driven opponent.
//!
//! State: `P:<board>|O:<board>|F:<fog>|OF:<fog>|T:<turn>|ST:<status>|LA:<shot>|W:<winner>`.
//! `P` and `O` hold each side's fleet; `F` is what the player has learned
//! about `O`, and `OF` what the opponent has learned about `P`. Coordinates
//! are `A1`..`J10`: the letter picks the column, the number is the row
//! index plus one.

use core::fmt;
use core::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::codec::{
    GameKind, OPPONENT_MOVE_CAP, Seat, Segments, Status, Symbol, Token, Winner, cap_candidates,
    parse_grid, parse_winner, text_or_dash, winner_token, write_grid,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

const GAME: GameKind = GameKind::SeaBattle;
const FILES: &str = "ABCDEFGHIJ";
const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Board side length.
pub const BOARD_SIZE: usize = 10;
/// Ship lengths placed for each side.
pub const FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// A sea-battle board, indexed `[row][col]`.
pub type Board = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Open water, or unknown on a fog board.
    #[default]
    Empty,
    /// An unhit ship section.
    Ship,
    /// A hit ship section.
    Hit,
    /// A shot that found water (fog boards only).
    Miss,
}

impl Symbol for Cell {
    fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Ship => 'S',
            Self::Hit => 'H',
            Self::Miss => 'M',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'S' => Some(Self::Ship),
            'H' => Some(Self::Hit),
            'M' => Some(Self::Miss),
            _ => None,
        }
    }
}

/// What a shot did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotResult {
    /// Water.
    Miss,
    /// A ship section, with more of that ship still afloat.
    Hit,
    /// The last section of a ship of the given length.
    Sunk(usize),
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Miss => f.write_str("miss"),
            Self::Hit => f.write_str("hit"),
            Self::Sunk(size) => write!(f, "sunk({size})"),
        }
    }
}

/// A sea-battle game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeaBattleState {
    /// The player's fleet.
    pub player_board: Board,
    /// The opponent's fleet.
    pub opponent_board: Board,
    /// The player's shots at the opponent.
    pub player_fog: Board,
    /// The opponent's shots at the player.
    pub opponent_fog: Board,
    /// Seat to fire next; unchanged once the game ends.
    pub turn: Seat,
    /// Game status.
    pub status: Status,
    /// Last shot, e.g. `B7:sunk(3)`.
    pub last_action: Option<String>,
    /// The side that sank the whole enemy fleet.
    pub winner: Option<Winner<Seat>>,
}

impl SeaBattleState {
    /// Places both fleets at random from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Places both fleets with a caller-supplied generator.
    #[must_use]
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let empty = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut player_board = empty;
        let mut opponent_board = empty;
        place_fleet(&mut player_board, rng);
        place_fleet(&mut opponent_board, rng);
        Self {
            player_board,
            opponent_board,
            player_fog: empty,
            opponent_fog: empty,
            turn: Seat::Player,
            status: Status::InProgress,
            last_action: None,
            winner: None,
        }
    }

    /// Parses a state string.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;
        let board = |key: &'static str| -> Result<Board, StateError> {
            parse_grid::<Cell, BOARD_SIZE, BOARD_SIZE>(GAME, segments.require(key)?)
        };
        Ok(Self {
            player_board: board("P")?,
            opponent_board: board("O")?,
            player_fog: board("F")?,
            opponent_fog: board("OF")?,
            turn: segments.token_or("T", Seat::Player, StateError::Turn(GAME))?,
            status: segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?,
            last_action: segments.text("LA"),
            winner: segments
                .get_non_empty("W")
                .map_or(Ok(None), |raw| parse_winner(GAME, raw))?,
        })
    }

    /// Returns the fog board of `seat`, the record of its own shots.
    #[must_use]
    pub const fn fog_of(&self, seat: Seat) -> &Board {
        match seat {
            Seat::Player => &self.player_fog,
            Seat::Opponent => &self.opponent_fog,
        }
    }

    /// Returns the squares the side to move has not fired at, row by row.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<String> {
        let fog = self.fog_of(self.turn);
        let mut moves = Vec::new();
        for (row, cells) in fog.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if *cell == Cell::Empty {
                    moves.push(coordinate_name(row, col));
                }
            }
        }
        moves
    }

    /// Fires the side to move's shot at `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the game is over, the coordinate is
    /// malformed, or this side already fired there.
    pub fn fire(&self, coordinate: &str) -> Result<(Self, ShotResult), ActionError> {
        if self.status != Status::InProgress {
            return Err(ActionError::GameOver);
        }
        let (row, col) = parse_coordinate(coordinate)?;
        let shooter = self.turn;

        let mut next = self.clone();
        let (target, fog) = match shooter {
            Seat::Player => (&mut next.opponent_board, &mut next.player_fog),
            Seat::Opponent => (&mut next.player_board, &mut next.opponent_fog),
        };
        if matches!(fog[row][col], Cell::Hit | Cell::Miss) {
            return Err(ActionError::AlreadyTargeted);
        }

        let result = if target[row][col] == Cell::Ship {
            target[row][col] = Cell::Hit;
            fog[row][col] = Cell::Hit;
            sunk_size(target, row, col).map_or(ShotResult::Hit, ShotResult::Sunk)
        } else {
            fog[row][col] = Cell::Miss;
            ShotResult::Miss
        };
        let fleet_sunk = target.iter().flatten().all(|cell| *cell != Cell::Ship);

        next.last_action = Some(format!("{}:{result}", coordinate_name(row, col)));
        if fleet_sunk {
            debug!(winner = shooter.token(), "sea battle fleet sunk");
            next.status = Status::GameOver;
            next.winner = Some(Winner::Side(shooter));
        } else {
            next.turn = shooter.other();
        }
        Ok((next, result))
    }
}

impl FromStr for SeaBattleState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SeaBattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P:{}|O:{}|F:{}|OF:{}|T:{}|ST:{}|LA:{}|W:{}",
            write_grid(&self.player_board),
            write_grid(&self.opponent_board),
            write_grid(&self.player_fog),
            write_grid(&self.opponent_fog),
            self.turn.token(),
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
            winner_token(self.winner),
        )
    }
}

/// Places every ship of [`FLEET`], retrying until each fits without
/// overlapping an earlier one.
fn place_fleet<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) {
    for size in FLEET {
        loop {
            let horizontal = rng.random_bool(0.5);
            let (row, col) = if horizontal {
                (
                    rng.random_range(0..BOARD_SIZE),
                    rng.random_range(0..=BOARD_SIZE - size),
                )
            } else {
                (
                    rng.random_range(0..=BOARD_SIZE - size),
                    rng.random_range(0..BOARD_SIZE),
                )
            };
            let cells: Vec<(usize, usize)> = (0..size)
                .map(|step| if horizontal { (row, col + step) } else { (row + step, col) })
                .collect();
            if cells.iter().any(|&(r, c)| board[r][c] == Cell::Ship) {
                continue;
            }
            for (r, c) in cells {
                board[r][c] = Cell::Ship;
            }
            trace!(size, row, col, horizontal, "placed ship");
            break;
        }
    }
}

/// Length of the ship hit at `(row, col)` if that hit sank it.
///
/// Floods the connected ship cells around the hit; the ship is sunk when
/// none of them is still unhit.
fn sunk_size(board: &Board, row: usize, col: usize) -> Option<usize> {
    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut stack = vec![(row, col)];
    let mut hits = 0;

    while let Some((r, c)) = stack.pop() {
        if visited[r][c] {
            continue;
        }
        visited[r][c] = true;
        match board[r][c] {
            Cell::Ship => return None,
            Cell::Hit => hits += 1,
            Cell::Empty | Cell::Miss => continue,
        }
        for (dr, dc) in NEIGHBOURS {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                continue;
            };
            if nr < BOARD_SIZE && nc < BOARD_SIZE && matches!(board[nr][nc], Cell::Hit | Cell::Ship) {
                stack.push((nr, nc));
            }
        }
    }
    (hits > 0).then_some(hits)
}

fn coordinate_name(row: usize, col: usize) -> String {
    let file = FILES.as_bytes().get(col).copied().map_or('?', char::from);
    format!("{file}{}", row + 1)
}

fn parse_coordinate(coordinate: &str) -> Result<(usize, usize), ActionError> {
    let cleaned = coordinate.trim().to_ascii_uppercase();
    if !(2..=3).contains(&cleaned.len()) || !cleaned.is_ascii() {
        return Err(ActionError::CoordinateFormat);
    }
    let (file, rank) = cleaned.split_at(1);
    let col = FILES.find(file).ok_or(ActionError::CoordinateFile)?;
    let rank: usize = rank.parse().map_err(|_| ActionError::CoordinateRank)?;
    if !(1..=BOARD_SIZE).contains(&rank) {
        return Err(ActionError::CoordinateRank);
    }
    Ok((rank - 1, col))
}

/// Summary of one applied shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeaBattleTurn {
    /// The new state string.
    pub state: String,
    /// Game status after the shot.
    pub status: Status,
    /// Seat to fire next.
    pub turn: Seat,
    /// The shot and its result, e.g. `C4:miss`.
    pub last_action: String,
    /// What the shot did.
    pub result: ShotResult,
    /// The shooter, when the shot sank the last ship.
    pub winner: Option<Winner<Seat>>,
}

/// Returns a new game with both fleets placed from `seed`.
#[must_use]
pub fn new_game(seed: u64) -> String {
    SeaBattleState::new(seed).to_string()
}

/// Fires for the side to move.
#[must_use]
pub fn apply_move(state: &str, coordinate: &str) -> Outcome<SeaBattleTurn> {
    let game = match SeaBattleState::parse(state) {
        Ok(game) => game,
        Err(err) => {
            debug!(error = %err, "rejected sea battle state");
            return Outcome::rejected(state, err);
        }
    };
    match game.fire(coordinate) {
        Ok((next, result)) => Outcome::Applied(SeaBattleTurn {
            state: next.to_string(),
            status: next.status,
            turn: next.turn,
            last_action: next.last_action.clone().unwrap_or_default(),
            result,
            winner: next.winner,
        }),
        Err(err) => {
            debug!(error = %err, coordinate, "rejected sea battle shot");
            Outcome::rejected(state, err)
        }
    }
}

/// Returns the squares the side to move may fire at; malformed state yields
/// an empty list.
#[must_use]
pub fn legal_moves(state: &str) -> Vec<String> {
    SeaBattleState::parse(state).map_or_else(|_| Vec::new(), |game| game.legal_moves())
}

/// Returns up to `limit` targets (`0` for all).
#[must_use]
pub fn opponent_candidates(state: &str, limit: usize) -> Vec<String> {
    cap_candidates(legal_moves(state), limit)
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
#[must_use]
pub fn default_opponent_candidates(state: &str) -> Vec<String> {
    opponent_candidates(state, OPPONENT_MOVE_CAP)
}
