//! Blackjack table options.
//!
//! Only the knobs that do not change legality live here. The dealer always
//! stands on every 17 and a round never holds more than four player hands.

/// How a fractional natural payout becomes whole chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Towards the next whole chip.
    Up,
    /// Drop the fraction.
    Down,
    /// Half a chip or more rounds up.
    Nearest,
}

impl RoundingMode {
    /// Rounds a payout to whole chips.
    #[must_use]
    pub fn apply(self, amount: f64) -> u64 {
        let rounded = match self {
            Self::Up => amount.ceil(),
            Self::Down => amount.floor(),
            Self::Nearest => amount.round(),
        };
        rounded.max(0.0) as u64
    }
}

/// Rules of one blackjack table, built with `with_*` setters:
///
/// ```
/// use turnstate::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_blackjack_pays(1.2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of 52-card decks shuffled into a fresh shoe.
    pub decks: u8,
    /// Multiplier paid on a natural, 3:2 by default.
    pub blackjack_pays: f64,
    /// Rounding applied to natural payouts.
    pub rounding_blackjack: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Shuffles `decks` decks into every fresh shoe.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstate::GameOptions;
    ///
    /// let six_deck = GameOptions::default().with_decks(6);
    /// assert_eq!(six_deck.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Pays naturals at `ratio` times the stake.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstate::GameOptions;
    ///
    /// let six_to_five = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(six_to_five.blackjack_payout(10), 12);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Chooses how fractional natural payouts round.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstate::{GameOptions, RoundingMode};
    ///
    /// let generous = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(generous.blackjack_payout(5), 8);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Returns the blackjack payout for a stake, rounded per the table rule.
    #[must_use]
    pub fn blackjack_payout(&self, bet: u64) -> u64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for chip amounts"
        )]
        let winnings = bet as f64 * self.blackjack_pays;
        self.rounding_blackjack.apply(winnings)
    }
}
