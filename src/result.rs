//! Round result types for blackjack showdown.

use crate::codec::Token;

/// Verdict for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses to the dealer's total or natural.
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural and the dealer does not.
    Blackjack,
    /// Player busted; a loss regardless of the dealer.
    Bust,
}

impl HandOutcome {
    /// Returns whether the verdict loses the stake.
    #[must_use]
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::Lose | Self::Bust)
    }
}

impl Token for HandOutcome {
    fn token(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Push => "push",
            Self::Blackjack => "blackjack",
            Self::Bust => "bust",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "win" => Some(Self::Win),
            "lose" => Some(Self::Lose),
            "push" => Some(Self::Push),
            "blackjack" => Some(Self::Blackjack),
            "bust" => Some(Self::Bust),
            _ => None,
        }
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Chips at risk on this hand (doubled hands risk twice the bet).
    pub stake: u64,
    /// Chips won (positive) or lost (negative).
    pub net: i64,
    /// The player's hand value.
    pub player_value: u32,
}

/// Result of the entire round after showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Results for each hand, in hand order.
    pub hands: Vec<HandResult>,
    /// The dealer's final hand value.
    pub dealer_value: u32,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Net result over all hands (zero when the round carries no wager).
    pub net: i64,
}
