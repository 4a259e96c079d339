use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::card::{Card, DECK_SIZE, deck};
use crate::codec::Status;
use crate::error::ActionError;
use crate::hand::{DealerHand, Hand};

use super::state::{BlackjackState, Turn, Wager};
use super::Blackjack;

impl Blackjack {
    /// Creates and shuffles a shoe of `options.decks` decks (at least one).
    fn create_shoe<R: Rng + ?Sized>(&self, rng: &mut R) -> VecDeque<Card> {
        let decks = usize::from(self.options.decks.max(1));
        let mut cards = Vec::with_capacity(decks * DECK_SIZE);
        for _ in 0..decks {
            cards.extend(deck());
        }
        cards.shuffle(rng);
        cards.into()
    }

    /// Deals a fresh round from a shoe shuffled with `seed`.
    ///
    /// Cards come off the front of the shoe in the order player, player,
    /// dealer, dealer. If either side holds a natural the round is over at
    /// once, with results and (when a wager is given) a settled stack.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::EmptyShoe`] if the shoe cannot cover the deal.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstate::{Blackjack, GameOptions, Wager};
    ///
    /// let table = Blackjack::new(GameOptions::default());
    /// let round = table.new_game(7, Some(Wager::new(100, 10).unwrap())).unwrap();
    /// assert_eq!(round.hands[0].len(), 2);
    /// assert_eq!(round.dealer.len(), 2);
    /// ```
    pub fn new_game(&self, seed: u64, wager: Option<Wager>) -> Result<BlackjackState, ActionError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.new_game_with_rng(&mut rng, wager)
    }

    /// Like [`Blackjack::new_game`], shuffling with a caller-supplied generator.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::EmptyShoe`] if the shoe cannot cover the deal.
    pub fn new_game_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        wager: Option<Wager>,
    ) -> Result<BlackjackState, ActionError> {
        let shoe = self.create_shoe(rng);
        self.deal(shoe, wager)
    }

    /// Deals the opening four cards from an already ordered shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::EmptyShoe`] if fewer than four cards remain and
    /// [`ActionError::AmountOutOfRange`] for a wager above the chip limit.
    pub fn deal(&self, shoe: VecDeque<Card>, wager: Option<Wager>) -> Result<BlackjackState, ActionError> {
        if wager.is_some_and(|wager| !wager.is_within_limits()) {
            return Err(ActionError::AmountOutOfRange);
        }
        let mut state = BlackjackState {
            shoe,
            hands: Vec::new(),
            dealer: DealerHand::default(),
            wager,
            turn: Turn::Player,
            hand_index: 0,
            status: Status::InProgress,
            last_action: Some("deal".to_owned()),
            results: None,
        };

        let first = state.draw()?;
        let second = state.draw()?;
        state.hands.push(Hand::new(vec![first, second]));
        for _ in 0..2 {
            let card = state.draw()?;
            state.dealer.add_card(card);
        }

        let player_natural = state.hands.iter().any(Hand::is_natural);
        if player_natural || state.dealer.is_blackjack() {
            debug!(player_natural, "natural on the deal");
            self.finish_round(&mut state);
        }
        Ok(state)
    }
}
