use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};

use super::state::{BlackjackState, Turn};
use super::{Blackjack, BlackjackAction};

impl Blackjack {
    /// Applies an already validated player action to the current hand.
    pub(super) fn apply_player_action(
        &self,
        state: &mut BlackjackState,
        action: BlackjackAction,
    ) -> Result<(), ActionError> {
        let index = state.hand_index;
        if index >= state.hands.len() {
            state.turn = Turn::Dealer;
            return Ok(());
        }

        match action {
            BlackjackAction::Hit => {
                let card = state.draw()?;
                let hand = &mut state.hands[index];
                hand.add_card(card);
                let total = hand.value().total;
                if total > 21 {
                    hand.set_status(HandStatus::Bust);
                } else if total == 21 {
                    hand.set_status(HandStatus::Stood);
                } else {
                    return Ok(());
                }
                self.advance_player_turn(state);
            }
            BlackjackAction::Stand => {
                state.hands[index].set_status(HandStatus::Stood);
                self.advance_player_turn(state);
            }
            BlackjackAction::Double => {
                let card = state.draw()?;
                let hand = &mut state.hands[index];
                hand.add_card(card);
                hand.mark_doubled();
                let status = if hand.value().total > 21 {
                    HandStatus::Bust
                } else {
                    HandStatus::Stood
                };
                hand.set_status(status);
                self.advance_player_turn(state);
            }
            BlackjackAction::Split => {
                let right = state.hands[index]
                    .take_split_card()
                    .ok_or(ActionError::IllegalAction)?;
                let left_draw = state.draw()?;
                let right_draw = state.draw()?;

                let left = &mut state.hands[index];
                left.add_card(left_draw);
                left.set_status(HandStatus::Active);
                state
                    .hands
                    .insert(index + 1, Hand::new(vec![right, right_draw]));
            }
        }
        Ok(())
    }

    /// Moves to the next active hand at or after `hand_index`, or hands the
    /// round to the dealer once none remain.
    ///
    /// If every hand busted the round ends without the dealer drawing and the
    /// index is left one past the last hand. Otherwise it is clamped to the
    /// last hand, and a dealer natural ends the round on handover.
    pub(super) fn advance_player_turn(&self, state: &mut BlackjackState) {
        if let Some(offset) = state
            .hands
            .get(state.hand_index..)
            .and_then(|rest| rest.iter().position(Hand::is_active))
        {
            state.hand_index += offset;
            return;
        }

        state.turn = Turn::Dealer;
        state.hand_index = state.hands.len();
        let all_bust = !state.hands.is_empty()
            && state
                .hands
                .iter()
                .all(|hand| hand.status() == HandStatus::Bust);
        if all_bust {
            self.finish_round(state);
            return;
        }

        state.hand_index = state.hand_index.saturating_sub(1);
        if state.dealer.is_blackjack() {
            self.finish_round(state);
        }
    }
}
