use tracing::debug;

use crate::codec::{MAX_CHIPS, Status};
use crate::error::ActionError;
use crate::hand::HandStatus;
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::state::{BlackjackState, stake};
use super::{Blackjack, BlackjackAction};

impl Blackjack {
    /// Applies the dealer's forced action.
    ///
    /// A hit that busts ends the round; a stand always does. A hit that stays
    /// at or under 21 leaves the dealer to act again.
    pub(super) fn apply_dealer_action(
        &self,
        state: &mut BlackjackState,
        action: BlackjackAction,
    ) -> Result<(), ActionError> {
        match action {
            BlackjackAction::Hit => {
                let card = state.draw()?;
                state.dealer.add_card(card);
                if state.dealer.is_bust() {
                    self.finish_round(state);
                }
                Ok(())
            }
            BlackjackAction::Stand => {
                self.finish_round(state);
                Ok(())
            }
            BlackjackAction::Double | BlackjackAction::Split => Err(ActionError::IllegalAction),
        }
    }

    /// Ends the round: records verdicts and settles the bankroll, if any.
    ///
    /// Winnings beyond [`MAX_CHIPS`] are not credited.
    pub(super) fn finish_round(&self, state: &mut BlackjackState) {
        let results = resolve_results(state);
        if let Some(wager) = state.wager.as_mut() {
            let net = state
                .hands
                .iter()
                .zip(&results)
                .map(|(hand, outcome)| self.hand_net(*outcome, stake(wager.bet, hand)))
                .fold(0_i64, i64::saturating_add);
            let change = net.unsigned_abs();
            wager.stack = if net >= 0 {
                wager.stack.saturating_add(change).min(MAX_CHIPS)
            } else {
                wager.stack.saturating_sub(change)
            };
            debug!(net, stack = wager.stack, "settled blackjack round");
        }
        state.status = Status::GameOver;
        state.results = Some(results);
    }

    /// Chips won or lost on one hand.
    fn hand_net(&self, outcome: HandOutcome, stake: u64) -> i64 {
        let stake_signed = i64::try_from(stake).unwrap_or(i64::MAX);
        match outcome {
            HandOutcome::Win => stake_signed,
            HandOutcome::Blackjack => {
                i64::try_from(self.options.blackjack_payout(stake)).unwrap_or(i64::MAX)
            }
            HandOutcome::Push => 0,
            HandOutcome::Lose | HandOutcome::Bust => -stake_signed,
        }
    }

    /// Summarizes a finished round.
    ///
    /// Returns `None` while the round is still in progress or when the state
    /// carries no results. `net` and the per-hand amounts are zero for rounds
    /// without a wager.
    #[must_use]
    pub fn round_result(&self, state: &BlackjackState) -> Option<RoundResult> {
        if state.status != Status::GameOver {
            return None;
        }
        let results = state.results.as_ref()?;
        let bet = state.wager.map_or(0, |wager| wager.bet);

        let hands: Vec<HandResult> = state
            .hands
            .iter()
            .zip(results)
            .enumerate()
            .map(|(hand_index, (hand, &outcome))| {
                let stake = stake(bet, hand);
                HandResult {
                    hand_index,
                    outcome,
                    stake,
                    net: self.hand_net(outcome, stake),
                    player_value: hand.value().total,
                }
            })
            .collect();

        Some(RoundResult {
            net: hands.iter().map(|hand| hand.net).fold(0, i64::saturating_add),
            hands,
            dealer_value: state.dealer.value().total,
            dealer_bust: state.dealer.is_bust(),
            dealer_blackjack: state.dealer.is_blackjack(),
        })
    }
}

/// Computes one verdict per player hand against the dealer's current cards.
///
/// A busted hand loses outright. Naturals beat everything but a dealer
/// natural, which they push against; any other hand loses to a dealer
/// natural. Otherwise a dealer bust pays every standing hand and totals are
/// compared.
#[must_use]
pub fn resolve_results(state: &BlackjackState) -> Vec<HandOutcome> {
    let dealer_total = state.dealer.value().total;
    let dealer_blackjack = state.dealer.is_blackjack();
    let dealer_bust = dealer_total > 21;

    state
        .hands
        .iter()
        .map(|hand| {
            let total = hand.value().total;
            if hand.status() == HandStatus::Bust || total > 21 {
                HandOutcome::Bust
            } else if hand.is_natural() {
                if dealer_blackjack {
                    HandOutcome::Push
                } else {
                    HandOutcome::Blackjack
                }
            } else if dealer_blackjack {
                HandOutcome::Lose
            } else if dealer_bust || total > dealer_total {
                HandOutcome::Win
            } else if total < dealer_total {
                HandOutcome::Lose
            } else {
                HandOutcome::Push
            }
        })
        .collect()
}
