//! Three-reel slot machine.
//!
//! State: `R:<reels>|BK:<stack>|B:<bet>|P:<payout>|ST:<status>|LA:<last>`.
//! Amounts are whole chips. Every spin costs the bet; three of a kind pays
//! the bet times the symbol's multiplier.

use core::fmt;
use core::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::codec::{
    GameKind, MAX_CHIPS, Segments, Status, Token, parse_chips, parse_count, parse_list,
    text_or_dash, write_list,
};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

const GAME: GameKind = GameKind::Slot;

/// Number of reels.
pub const REELS: usize = 3;

/// A reel symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reel {
    /// `7`.
    Seven,
    /// `BAR`.
    Bar,
    /// `BELL`.
    Bell,
    /// `CHERRY`.
    Cherry,
    /// `LEMON`.
    Lemon,
    /// `ORANGE`.
    Orange,
}

impl Reel {
    /// Every symbol, in reel-strip order.
    pub const ALL: [Self; 6] = [
        Self::Seven,
        Self::Bar,
        Self::Bell,
        Self::Cherry,
        Self::Lemon,
        Self::Orange,
    ];

    /// Relative frequency on the reel strip.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Seven => 1,
            Self::Bar => 2,
            Self::Bell => 3,
            Self::Cherry => 4,
            Self::Lemon | Self::Orange => 5,
        }
    }

    /// Bet multiplier paid for three of this symbol.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Seven => 10,
            Self::Bar => 8,
            Self::Bell => 6,
            Self::Cherry => 4,
            Self::Lemon => 3,
            Self::Orange => 2,
        }
    }

    /// Draws one symbol according to the strip weights.
    fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: u32 = Self::ALL.iter().map(|reel| reel.weight()).sum();
        let mut roll = rng.random_range(0..total);
        for reel in Self::ALL {
            if roll < reel.weight() {
                return reel;
            }
            roll -= reel.weight();
        }
        Self::Orange
    }
}

impl Token for Reel {
    fn token(self) -> &'static str {
        match self {
            Self::Seven => "7",
            Self::Bar => "BAR",
            Self::Bell => "BELL",
            Self::Cherry => "CHERRY",
            Self::Lemon => "LEMON",
            Self::Orange => "ORANGE",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reel| reel.token() == raw)
    }
}

/// Returns the payout for a spin: bet times multiplier on three of a kind,
/// otherwise nothing.
#[must_use]
pub fn payout(reels: &[Reel], bet: u64) -> u64 {
    match reels {
        [first, second, third] if first == second && second == third => {
            bet.saturating_mul(first.multiplier())
        }
        _ => 0,
    }
}

type AmountParser = fn(GameKind, &'static str, &str) -> Result<u64, StateError>;

/// A slot machine session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotState {
    /// Symbols showing; empty before the first spin.
    pub reels: Vec<Reel>,
    /// Chips held.
    pub stack: u64,
    /// Chips staked per spin.
    pub bet: u64,
    /// Chips paid by the last spin.
    pub payout: u64,
    /// Session status; spins never end it.
    pub status: Status,
    /// `spin` after the first spin.
    pub last_action: Option<String>,
}

impl SlotState {
    /// Starts a session.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] unless `0 < bet <= stack <= MAX_CHIPS`.
    pub fn new(stack: u64, bet: u64) -> Result<Self, ActionError> {
        let state = Self {
            reels: Vec::new(),
            stack,
            bet,
            payout: 0,
            status: Status::InProgress,
            last_action: None,
        };
        state.check_wager()?;
        Ok(state)
    }

    /// Parses a state string. Absent amounts read as zero; the stack and bet
    /// may not exceed [`MAX_CHIPS`].
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] naming the malformed part.
    pub fn parse(text: &str) -> Result<Self, StateError> {
        let segments = Segments::parse(GAME, text)?;
        let amount = |key: &str, field: &'static str, parse: AmountParser| -> Result<u64, StateError> {
            match segments.get_non_empty(key) {
                None | Some("-") => Ok(0),
                Some(raw) => parse(GAME, field, raw),
            }
        };
        Ok(Self {
            reels: parse_list(segments.get("R"))
                .into_iter()
                .map(|raw| Reel::from_token(raw).ok_or(StateError::Reel(GAME)))
                .collect::<Result<_, _>>()?,
            stack: amount("BK", "stack", parse_chips)?,
            bet: amount("B", "bet", parse_chips)?,
            payout: amount("P", "payout", parse_count)?,
            status: segments.token_or("ST", Status::InProgress, StateError::Status(GAME))?,
            last_action: segments.text("LA"),
        })
    }

    const fn check_wager(&self) -> Result<(), ActionError> {
        if self.stack > MAX_CHIPS {
            return Err(ActionError::AmountOutOfRange);
        }
        if self.stack == 0 {
            return Err(ActionError::StackNotPositive);
        }
        if self.bet == 0 {
            return Err(ActionError::BetNotPositive);
        }
        if self.bet > self.stack {
            return Err(ActionError::BetExceedsStack);
        }
        Ok(())
    }

    /// Spins all reels.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] unless `0 < bet <= stack <= MAX_CHIPS`.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, ActionError> {
        self.check_wager()?;
        let reels: Vec<Reel> = (0..REELS).map(|_| Reel::pick(rng)).collect();
        let won = payout(&reels, self.bet);
        let stack = (self.stack - self.bet)
            .checked_add(won)
            .ok_or(ActionError::AmountOutOfRange)?
            .min(MAX_CHIPS);
        Ok(Self {
            reels,
            stack,
            bet: self.bet,
            payout: won,
            status: Status::InProgress,
            last_action: Some("spin".to_owned()),
        })
    }
}

impl FromStr for SlotState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R:{}|BK:{}|B:{}|P:{}|ST:{}|LA:{}",
            write_list(self.reels.iter().map(|reel| reel.token())),
            self.stack,
            self.bet,
            self.payout,
            self.status.token(),
            text_or_dash(self.last_action.as_deref()),
        )
    }
}

/// Summary of one spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpin {
    /// The new state string.
    pub state: String,
    /// Symbols showing.
    pub reels: Vec<Reel>,
    /// Chips held after the spin.
    pub stack: u64,
    /// Chips staked.
    pub bet: u64,
    /// Chips paid.
    pub payout: u64,
}

/// Starts a session.
///
/// # Errors
///
/// Returns an [`ActionError`] unless `0 < bet <= stack <= MAX_CHIPS`.
pub fn new_game(stack: u64, bet: u64) -> Result<String, ActionError> {
    SlotState::new(stack, bet).map(|state| state.to_string())
}

/// Spins with reels drawn from `seed`.
#[must_use]
pub fn spin(state: &str, seed: u64) -> Outcome<SlotSpin> {
    spin_with_rng(state, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Spins with a caller-supplied generator.
#[must_use]
pub fn spin_with_rng<R: Rng + ?Sized>(state: &str, rng: &mut R) -> Outcome<SlotSpin> {
    let session = match SlotState::parse(state) {
        Ok(session) => session,
        Err(err) => {
            debug!(error = %err, "rejected slot state");
            return Outcome::rejected(state, err);
        }
    };
    match session.spin(rng) {
        Ok(next) => Outcome::Applied(SlotSpin {
            state: next.to_string(),
            reels: next.reels.clone(),
            stack: next.stack,
            bet: next.bet,
            payout: next.payout,
        }),
        Err(err) => {
            debug!(error = %err, "rejected slot spin");
            Outcome::rejected(state, err)
        }
    }
}
