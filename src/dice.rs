//! Polyhedral dice rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ActionError;

/// Die sizes that may be rolled.
pub const ALLOWED_SIDES: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

/// Most dice rolled at once.
pub const MAX_DICE: u32 = 100;

/// The outcome of rolling `count` dice of `sides` sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    /// Sides per die.
    pub sides: u32,
    /// Dice rolled.
    pub count: u32,
    /// Face of each die, in roll order.
    pub rolls: Vec<u32>,
}

impl DiceRoll {
    /// Sum of all faces.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.rolls.iter().sum()
    }
}

/// Rolls `count` dice of `sides` sides from `seed`.
///
/// # Errors
///
/// Returns [`ActionError::DiceSides`] for a die size outside
/// [`ALLOWED_SIDES`] and [`ActionError::DiceCount`] for a count outside
/// `1..=MAX_DICE`.
pub fn roll_dice(sides: u32, count: u32, seed: u64) -> Result<DiceRoll, ActionError> {
    roll_dice_with_rng(sides, count, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Like [`roll_dice`] with a caller-supplied generator.
///
/// # Errors
///
/// As [`roll_dice`].
pub fn roll_dice_with_rng<R: Rng + ?Sized>(
    sides: u32,
    count: u32,
    rng: &mut R,
) -> Result<DiceRoll, ActionError> {
    if !ALLOWED_SIDES.contains(&sides) {
        return Err(ActionError::DiceSides);
    }
    if !(1..=MAX_DICE).contains(&count) {
        return Err(ActionError::DiceCount);
    }
    Ok(DiceRoll {
        sides,
        count,
        rolls: (0..count).map(|_| rng.random_range(1..=sides)).collect(),
    })
}
