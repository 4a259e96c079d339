//! Six-pit mancala with captures and extra turns.
//!
//! State: `P:<pits>|O:<pits>|PS:<n>|OS:<n>|T:<turn>|ST:<status>|LA:<tokens>|W:<winner>`.
//! Pits are listed left to right from each owner's point of view; pit `i`
//! of one side faces pit `5 - i` of the other.

use core::fmt;
use core::str::FromStr;

use tracing::{debug, trace};

use crate::codec::{
    GameKind, OPPONENT_MOVE_CAP, Seat, Segments, Status, Token, Winner, cap_candidates,
    parse_count, parse_winner, text_or_dash, winner_token, write_list,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

const GAME: GameKind = GameKind::Mancala;

/// Pits on each side.
pub const PITS: usize = 6;
/// Seeds in each pit at the start.
pub const STARTING_SEEDS: u64 = 4;
/// Most seeds a board may hold across pits and stores.
pub const MAX_SEEDS: u64 = 10_000;

/// One side's pits.
pub type Pits = [u64; PITS];

/// A position on the sowing ring, seen from the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Own(usize),
    Store,
    Opposing(usize),
}

/// The mover's ring: own pits left to right, own store, then the opposing
/// pits right to left. The opposing store is skipped.
const RING: [Slot; 2 * PITS + 1] = [
    Slot::Own(0),
    Slot::Own(1),
    Slot::Own(2),
    Slot::Own(3),
    Slot::Own(4),
    Slot::Own(5),
    Slot::Store,
    Slot::Opposing(5),
    Slot::Opposing(4),
    Slot::Opposing(3),
    Slot::Opposing(2),
    Slot::Opposing(1),
    Slot::Opposing(0),
];

/// Returns the opposing pit facing own pit `index`.
#[must_use]
pub const fn mirror(index: usize) -> usize {
    PITS - 1 - index
}

/// A mancala position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MancalaState {
    /// The player's pits.
    pub player_pits: Pits,
    /// The opponent's pits.
    pub opponent_pits: Pits,
    /// Seeds in the player's store.
    pub player_store: u64,
    /// Seeds in the opponent's store.
    pub opponent_store: u64,
    /// Seat to move.
    pub turn: Seat,
    /// Game status.
    pub status: Status,
    /// Tokens describing the last move, e.g. `pit3,capture5`.
    pub last_action: Option<String>,
    /// Result once the game ends.
    pub winner: Option<Winner<Seat>>,
}

impl Default for MancalaState {
    fn default() -> Self {
        Self {
            player_pits: [STARTING_SEEDS; PITS],
            opponent_pits: [STARTING_SEEDS; PITS],
            player_store: 0,
            opponent_store: 0,
            turn: Seat::Player,
            status: Status::InProgress,
            last_action: None,
            winner: None,
        }
    }
}

impl MancalaState {
    /// Parses a state string.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;
        let state = Self {
            player_pits: parse_pits(segments.require("P")?)?,
            opponent_pits: parse_pits(segments.require("O")?)?,
            player_store: parse_count(GAME, "player store", segments.require("PS")?)?,
            opponent_store: parse_count(GAME, "opponent store", segments.require("OS")?)?,
            turn: segments.token_or("T", Seat::Player, StateError::Turn(GAME))?,
            status: segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?,
            last_action: segments.text("LA"),
            winner: segments
                .get_non_empty("W")
                .map_or(Ok(None), |raw| parse_winner(GAME, raw))?,
        };
        if state.total_seeds() > MAX_SEEDS {
            return Err(StateError::Number { game: GAME, field: "seed total" });
        }
        Ok(state)
    }

    /// Returns the pits and store of `seat`.
    #[must_use]
    pub const fn side(&self, seat: Seat) -> (&Pits, u64) {
        match seat {
            Seat::Player => (&self.player_pits, self.player_store),
            Seat::Opponent => (&self.opponent_pits, self.opponent_store),
        }
    }

    /// Total seeds on the board and in both stores, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_seeds(&self) -> u64 {
        self.player_pits
            .iter()
            .chain(&self.opponent_pits)
            .chain([&self.player_store, &self.opponent_store])
            .fold(0, |total: u64, seeds| total.saturating_add(*seeds))
    }

    /// Returns the non-empty pits (1-based) of the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.status != Status::InProgress {
            return Vec::new();
        }
        self.side(self.turn)
            .0
            .iter()
            .enumerate()
            .filter(|(_, seeds)| **seeds > 0)
            .map(|(index, _)| index as u8 + 1)
            .collect()
    }

    /// Sows from `pit` (1-based) for the side to move.
    ///
    /// A last seed in the mover's store earns another turn. A last seed in an
    /// empty own pit captures it together with the facing pit, if that pit
    /// holds seeds. When either row is empty afterwards, all remaining seeds
    /// go to their owners' stores and the larger store wins.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the game is over, the pit is out of
    /// range, or the pit is empty, and [`ActionError::AmountOutOfRange`] when
    /// the board holds more than [`MAX_SEEDS`].
    pub fn play(&self, pit: u8) -> Result<Self, ActionError> {
        if self.status != Status::InProgress {
            return Err(ActionError::GameOver);
        }
        if self.total_seeds() > MAX_SEEDS {
            return Err(ActionError::AmountOutOfRange);
        }
        if !(1..=PITS).contains(&usize::from(pit)) {
            return Err(ActionError::InvalidPit);
        }
        let start = usize::from(pit) - 1;

        let mover = self.turn;
        let (mut own, mut opposing, mut store, opposing_store) = match mover {
            Seat::Player => (
                self.player_pits,
                self.opponent_pits,
                self.player_store,
                self.opponent_store,
            ),
            Seat::Opponent => (
                self.opponent_pits,
                self.player_pits,
                self.opponent_store,
                self.player_store,
            ),
        };

        let mut seeds = own[start];
        if seeds == 0 {
            return Err(ActionError::EmptyPit);
        }
        own[start] = 0;

        let mut cursor = start;
        while seeds > 0 {
            cursor = (cursor + 1) % RING.len();
            match RING[cursor] {
                Slot::Own(index) => own[index] += 1,
                Slot::Store => store += 1,
                Slot::Opposing(index) => opposing[index] += 1,
            }
            seeds -= 1;
        }

        let mut tokens = vec![format!("pit{pit}")];
        let last = RING[cursor];
        if let Slot::Own(index) = last {
            let facing = mirror(index);
            if own[index] == 1 && opposing[facing] > 0 {
                let captured = opposing[facing] + 1;
                trace!(index, facing, captured, "mancala capture");
                own[index] = 0;
                opposing[facing] = 0;
                store += captured;
                tokens.push(format!("capture{captured}"));
            }
        }
        let extra_turn = last == Slot::Store;
        if extra_turn {
            tokens.push("extra_turn".to_owned());
        }

        let (player_pits, opponent_pits, player_store, opponent_store) = match mover {
            Seat::Player => (own, opposing, store, opposing_store),
            Seat::Opponent => (opposing, own, opposing_store, store),
        };
        let mut next = Self {
            player_pits,
            opponent_pits,
            player_store,
            opponent_store,
            turn: if extra_turn { mover } else { mover.other() },
            status: Status::InProgress,
            last_action: None,
            winner: None,
        };

        let row_empty = |pits: &Pits| pits.iter().all(|seeds| *seeds == 0);
        if row_empty(&next.player_pits) || row_empty(&next.opponent_pits) {
            next.sweep();
            next.turn = mover;
            tokens.push("sweep".to_owned());
            debug!(winner = winner_token(next.winner), "mancala game over");
        }

        next.last_action = Some(tokens.join(","));
        Ok(next)
    }

    /// Moves every pit into its owner's store and decides the game.
    fn sweep(&mut self) {
        self.player_store += self.player_pits.iter().sum::<u64>();
        self.opponent_store += self.opponent_pits.iter().sum::<u64>();
        self.player_pits = [0; PITS];
        self.opponent_pits = [0; PITS];
        self.status = Status::GameOver;
        self.winner = Some(match self.player_store.cmp(&self.opponent_store) {
            core::cmp::Ordering::Greater => Winner::Side(Seat::Player),
            core::cmp::Ordering::Less => Winner::Side(Seat::Opponent),
            core::cmp::Ordering::Equal => Winner::Draw,
        });
    }
}

fn parse_pits(raw: &str) -> Result<Pits, StateError> {
    let values: Vec<&str> = raw.split(',').collect();
    if values.len() != PITS {
        return Err(StateError::PitCount(GAME));
    }
    let mut pits = [0; PITS];
    for (pit, value) in pits.iter_mut().zip(values) {
        *pit = parse_count(GAME, "pit value", value.trim())?;
    }
    Ok(pits)
}

impl FromStr for MancalaState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MancalaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P:{}|O:{}|PS:{}|OS:{}|T:{}|ST:{}|LA:{}|W:{}",
            write_list(self.player_pits),
            write_list(self.opponent_pits),
            self.player_store,
            self.opponent_store,
            self.turn.token(),
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
            winner_token(self.winner),
        )
    }
}

/// Summary of one applied mancala move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MancalaTurn {
    /// The new state string.
    pub state: String,
    /// Game status after the move.
    pub status: Status,
    /// Seat to move next.
    pub turn: Seat,
    /// Comma-joined move tokens.
    pub last_action: String,
    /// Result, when the move ended the game.
    pub winner: Option<Winner<Seat>>,
}

/// Returns the opening position: four seeds per pit, player to move.
#[must_use]
pub fn new_game() -> String {
    MancalaState::default().to_string()
}

/// Sows from `pit` (1-based) for the side to move.
#[must_use]
pub fn apply_move(state: &str, pit: u8) -> Outcome<MancalaTurn> {
    let board = match MancalaState::parse(state) {
        Ok(board) => board,
        Err(err) => {
            debug!(error = %err, "rejected mancala state");
            return Outcome::rejected(state, err);
        }
    };
    match board.play(pit) {
        Ok(next) => Outcome::Applied(MancalaTurn {
            state: next.to_string(),
            status: next.status,
            turn: next.turn,
            last_action: next.last_action.clone().unwrap_or_default(),
            winner: next.winner,
        }),
        Err(err) => {
            debug!(error = %err, pit, "rejected mancala move");
            Outcome::rejected(state, err)
        }
    }
}

/// Returns the playable pits; malformed state yields an empty list.
#[must_use]
pub fn legal_moves(state: &str) -> Vec<u8> {
    MancalaState::parse(state).map_or_else(|_| Vec::new(), |board| board.legal_moves())
}

/// Returns up to `limit` playable pits (`0` for all).
#[must_use]
pub fn opponent_candidates(state: &str, limit: usize) -> Vec<u8> {
    cap_candidates(legal_moves(state), limit)
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
#[must_use]
pub fn default_opponent_candidates(state: &str) -> Vec<u8> {
    opponent_candidates(state, OPPONENT_MOVE_CAP)
}
