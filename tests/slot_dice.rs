//! Slot machine and dice tests.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use turnstate::dice::{self, ALLOWED_SIDES, MAX_DICE};
use turnstate::slot::{self, REELS, Reel, SlotState};
use turnstate::{ActionError, Error, GameKind, MAX_CHIPS, StateError};

#[test]
fn new_session() {
    assert_eq!(
        slot::new_game(100, 10).unwrap(),
        "R:-|BK:100|B:10|P:0|ST:in_progress|LA:-"
    );
    assert_eq!(slot::new_game(0, 1), Err(ActionError::StackNotPositive));
    assert_eq!(slot::new_game(10, 0), Err(ActionError::BetNotPositive));
    assert_eq!(slot::new_game(5, 10), Err(ActionError::BetExceedsStack));
}

#[test]
fn three_of_a_kind_pays_the_multiplier() {
    assert_eq!(slot::payout(&[Reel::Seven; 3], 5), 50);
    assert_eq!(slot::payout(&[Reel::Bar; 3], 5), 40);
    assert_eq!(slot::payout(&[Reel::Orange; 3], 5), 10);
    assert_eq!(slot::payout(&[Reel::Seven, Reel::Seven, Reel::Bar], 5), 0);
    assert_eq!(slot::payout(&[Reel::Seven; 2], 5), 0);
}

#[test]
fn spin_charges_the_bet_and_adds_the_payout() {
    let start = slot::new_game(100, 10).unwrap();
    for seed in 0..64 {
        let spin = slot::spin(&start, seed).into_result().unwrap();
        assert_eq!(spin.reels.len(), REELS);
        assert_eq!(spin.bet, 10);
        assert_eq!(spin.payout, slot::payout(&spin.reels, 10));
        assert_eq!(spin.stack, 90 + spin.payout);

        let state = SlotState::parse(&spin.state).unwrap();
        assert_eq!(state.reels, spin.reels);
        assert_eq!(state.last_action.as_deref(), Some("spin"));
        assert_eq!(state.to_string(), spin.state);
    }
    assert_eq!(slot::spin(&start, 9), slot::spin(&start, 9));
}

#[test]
fn every_symbol_turns_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut state = SlotState::new(1_000_000, 1).unwrap();
    let mut seen = HashSet::new();
    for _ in 0..600 {
        state = state.spin(&mut rng).unwrap();
        seen.extend(state.reels.iter().copied());
    }
    assert_eq!(seen.len(), Reel::ALL.len());
}

#[test]
fn spin_rejections_echo_the_state() {
    let short = "R:-|BK:5|B:10|P:0|ST:in_progress|LA:-";
    let rejection = slot::spin(short, 1).into_result().unwrap_err();
    assert_eq!(rejection.state, short);
    assert_eq!(rejection.error, Error::Action(ActionError::BetExceedsStack));

    let broke = "R:-";
    let rejection = slot::spin(broke, 1).into_result().unwrap_err();
    assert_eq!(rejection.error, Error::Action(ActionError::StackNotPositive));

    let bad_reel = "R:7,FOO,BAR|BK:10|B:1";
    let rejection = slot::spin_with_rng(bad_reel, &mut ChaCha8Rng::seed_from_u64(0))
        .into_result()
        .unwrap_err();
    assert_eq!(rejection.error, Error::State(StateError::Reel(GameKind::Slot)));
}

#[test]
fn chip_amounts_stay_within_the_limit() {
    let huge = "R:-|BK:18446744073709551615|B:1|P:0|ST:in_progress|LA:-";
    let rejection = slot::spin(huge, 1).into_result().unwrap_err();
    assert_eq!(rejection.state, huge);
    assert_eq!(
        rejection.error,
        Error::State(StateError::Number { game: GameKind::Slot, field: "stack" })
    );

    let built = SlotState {
        stack: u64::MAX,
        ..SlotState::new(10, 1).unwrap()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(built.spin(&mut rng), Err(ActionError::AmountOutOfRange));
    assert_eq!(slot::new_game(MAX_CHIPS + 1, 1), Err(ActionError::AmountOutOfRange));

    let mut state = SlotState::new(MAX_CHIPS, MAX_CHIPS).unwrap();
    for _ in 0..200 {
        let Ok(next) = state.spin(&mut rng) else {
            break;
        };
        assert!(next.stack <= MAX_CHIPS);
        assert_eq!(next.to_string().parse::<SlotState>().unwrap(), next);
        state = next;
    }
}

#[test]
fn slot_state_parsing() {
    let state = SlotState::parse("R:7,BAR,CHERRY|BK:40|B:5|P:0|ST:in_progress|LA:spin").unwrap();
    assert_eq!(state.reels, vec![Reel::Seven, Reel::Bar, Reel::Cherry]);
    assert_eq!(state.stack, 40);

    assert_eq!(
        SlotState::parse("R:-|BK:lots|B:5"),
        Err(StateError::Number { game: GameKind::Slot, field: "stack" })
    );
}

#[test]
fn dice_rolls_stay_in_range() {
    for &sides in &ALLOWED_SIDES {
        let roll = dice::roll_dice(sides, 10, u64::from(sides)).unwrap();
        assert_eq!(roll.sides, sides);
        assert_eq!(roll.count, 10);
        assert_eq!(roll.rolls.len(), 10);
        assert!(roll.rolls.iter().all(|face| (1..=sides).contains(face)));
        assert_eq!(roll.total(), roll.rolls.iter().sum::<u32>());
    }
    assert_eq!(dice::roll_dice(20, 5, 7), dice::roll_dice(20, 5, 7));
    assert_eq!(dice::roll_dice(6, MAX_DICE, 1).unwrap().rolls.len(), 100);
}

#[test]
fn dice_limits() {
    assert_eq!(dice::roll_dice(7, 1, 0), Err(ActionError::DiceSides));
    assert_eq!(dice::roll_dice(0, 1, 0), Err(ActionError::DiceSides));
    assert_eq!(dice::roll_dice(6, 0, 0), Err(ActionError::DiceCount));
    assert_eq!(dice::roll_dice(6, MAX_DICE + 1, 0), Err(ActionError::DiceCount));

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert!(dice::roll_dice_with_rng(100, 3, &mut rng).is_ok());
}
