//! Property tests for the state codecs.

use std::collections::VecDeque;

use proptest::prelude::*;
use turnstate::four_in_a_row::{Disc, FourInARowState};
use turnstate::tic_tac_toe::{self, Mark, TicTacToeState};
use turnstate::{
    Blackjack, BlackjackState, Card, Hand, HandOutcome, HandStatus, Outcome, Seat, Status, Suit,
    Turn, Wager, Winner, checkers, chess, mancala, sea_battle, slot,
};

fn card() -> impl Strategy<Value = Card> {
    (0usize..4, 1u8..=13).prop_map(|(suit, rank)| Card::new(Suit::ALL[suit], rank))
}

fn hand() -> impl Strategy<Value = Hand> {
    (
        prop::collection::vec(card(), 1..6),
        prop_oneof![
            Just(HandStatus::Active),
            Just(HandStatus::Stood),
            Just(HandStatus::Bust),
            Just(HandStatus::Blackjack),
        ],
        any::<bool>(),
    )
        .prop_map(|(cards, status, doubled)| Hand::from_parts(cards, status, doubled))
}

fn outcome() -> impl Strategy<Value = HandOutcome> {
    prop_oneof![
        Just(HandOutcome::Win),
        Just(HandOutcome::Lose),
        Just(HandOutcome::Push),
        Just(HandOutcome::Blackjack),
        Just(HandOutcome::Bust),
    ]
}

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::InProgress), Just(Status::GameOver)]
}

fn seat() -> impl Strategy<Value = Seat> {
    prop_oneof![Just(Seat::Player), Just(Seat::Opponent)]
}

fn winner() -> impl Strategy<Value = Option<Winner<Seat>>> {
    prop_oneof![
        Just(None),
        Just(Some(Winner::Draw)),
        seat().prop_map(|seat| Some(Winner::Side(seat))),
    ]
}

prop_compose! {
    fn blackjack_state()(
        shoe in prop::collection::vec(card(), 0..20),
        hands in prop::collection::vec(hand(), 1..=4),
        dealer in prop::collection::vec(card(), 0..5),
        wager in prop::option::of((1u64..10_000, 1u64..500)),
        dealer_turn in any::<bool>(),
        hand_index in 0usize..5,
        status in status(),
        last_action in prop::option::of(prop_oneof![
            Just("deal"), Just("hit"), Just("stand"), Just("double"), Just("split"),
        ]),
        results in prop::option::of(prop::collection::vec(outcome(), 1..=4)),
    ) -> BlackjackState {
        BlackjackState {
            shoe: VecDeque::from(shoe),
            hands,
            dealer: turnstate::DealerHand::new(dealer),
            wager: wager.map(|(stack, bet)| Wager { stack, bet }),
            turn: if dealer_turn { Turn::Dealer } else { Turn::Player },
            hand_index,
            status,
            last_action: last_action.map(str::to_owned),
            results,
        }
    }
}

fn tic_tac_toe_cell() -> impl Strategy<Value = tic_tac_toe::Cell> {
    prop_oneof![
        Just(tic_tac_toe::Cell(None)),
        Just(tic_tac_toe::Cell(Some(Mark::X))),
        Just(tic_tac_toe::Cell(Some(Mark::O))),
    ]
}

fn disc() -> impl Strategy<Value = Disc> {
    prop_oneof![Just(Disc::Empty), Just(Disc::Red), Just(Disc::Yellow)]
}

proptest! {
    #[test]
    fn blackjack_state_round_trips(state in blackjack_state()) {
        let text = state.to_string();
        let parsed: BlackjackState = text.parse().unwrap();
        prop_assert_eq!(&parsed, &state);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn tic_tac_toe_state_round_trips(
        grid in prop::array::uniform3(prop::array::uniform3(tic_tac_toe_cell())),
        turn in seat(),
        status in status(),
        winner in winner(),
        player_is_x in any::<bool>(),
    ) {
        let player = if player_is_x { Mark::X } else { Mark::O };
        let state = TicTacToeState {
            grid,
            turn,
            status,
            last_action: None,
            winner,
            player,
            opponent: player.other(),
        };
        let parsed: TicTacToeState = state.to_string().parse().unwrap();
        prop_assert_eq!(parsed, state);
    }

    #[test]
    fn four_in_a_row_state_round_trips(
        grid in prop::array::uniform6(prop::array::uniform7(disc())),
        turn in seat(),
        status in status(),
        winner in winner(),
        column in prop::option::of(1u8..=7),
    ) {
        let state = FourInARowState {
            grid,
            turn,
            status,
            last_action: column.map(|column| column.to_string()),
            winner,
        };
        let parsed: FourInARowState = state.to_string().parse().unwrap();
        prop_assert_eq!(parsed, state);
    }

    #[test]
    fn rejections_echo_arbitrary_input(input in ".{0,80}") {
        let table = Blackjack::default();
        if let Outcome::Rejected(rejection) = table.apply(&input, "hit") {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = checkers::apply_move(&input, "c3d4") {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = chess::apply_move(&input, "e2e4") {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = tic_tac_toe::apply_move(&input, "B2") {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = mancala::apply_move(&input, 1) {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = sea_battle::apply_move(&input, "A1") {
            prop_assert_eq!(rejection.state, input.clone());
        }
        if let Outcome::Rejected(rejection) = slot::spin(&input, 0) {
            prop_assert_eq!(rejection.state, input.clone());
        }
    }

    #[test]
    fn blackjack_actions_never_lose_cards(seed in any::<u64>(), choices in prop::collection::vec(0usize..4, 1..12)) {
        let table = Blackjack::default();
        let mut state = table.new_game(seed, Some(Wager::new(1_000, 10).unwrap())).unwrap();
        let card_count = |state: &BlackjackState| {
            state.shoe.len()
                + state.dealer.len()
                + state.hands.iter().map(Hand::len).sum::<usize>()
        };
        let total = card_count(&state);

        for choice in choices {
            let mut actions = table.legal_player_actions(&state);
            actions.extend(table.legal_dealer_actions(&state));
            let Some(action) = actions.get(choice % actions.len().max(1)) else {
                break;
            };
            state = table.play(&state, action.as_str()).unwrap();
            prop_assert_eq!(card_count(&state), total);
            prop_assert!(state.hands.len() <= turnstate::blackjack::MAX_HANDS);
        }
    }

    #[test]
    fn checkers_positions_round_trip_through_play(choices in prop::collection::vec(any::<prop::sample::Index>(), 1..60)) {
        let mut state = checkers::new_game();
        for choice in choices {
            let moves = checkers::legal_moves(&state).unwrap();
            if moves.is_empty() {
                break;
            }
            let turn = checkers::apply_move(&state, choice.get::<String>(&moves)).into_result().unwrap();
            let parsed = checkers::CheckersState::parse(&turn.state).unwrap();
            prop_assert_eq!(parsed.to_string(), turn.state.clone());
            prop_assert_eq!(parsed.turn, turn.turn);
            if turn.status == Status::GameOver {
                break;
            }
            state = turn.state;
        }
    }

    #[test]
    fn sea_battle_positions_round_trip_through_play(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<prop::sample::Index>(), 1..120),
    ) {
        let mut state = sea_battle::new_game(seed);
        for choice in choices {
            let targets = sea_battle::legal_moves(&state);
            if targets.is_empty() {
                break;
            }
            let turn = sea_battle::apply_move(&state, choice.get::<String>(&targets)).into_result().unwrap();
            let parsed = sea_battle::SeaBattleState::parse(&turn.state).unwrap();
            prop_assert_eq!(parsed.to_string(), turn.state.clone());
            prop_assert_eq!(parsed.turn, turn.turn);
            prop_assert_eq!(parsed.status, turn.status);
            if turn.status == Status::GameOver {
                break;
            }
            state = turn.state;
        }
    }

    #[test]
    fn slot_sessions_round_trip_through_spins(
        stack in 1u64..100_000,
        bet_share in 1u64..=100,
        seeds in prop::collection::vec(any::<u64>(), 1..40),
    ) {
        let bet = (stack * bet_share / 100).max(1);
        let mut state = slot::new_game(stack, bet).unwrap();
        for seed in seeds {
            let Outcome::Applied(spin) = slot::spin(&state, seed) else {
                let parsed = slot::SlotState::parse(&state).unwrap();
                prop_assert!(parsed.bet > parsed.stack);
                break;
            };
            let parsed = slot::SlotState::parse(&spin.state).unwrap();
            prop_assert_eq!(parsed.to_string(), spin.state.clone());
            prop_assert_eq!(parsed.stack, spin.stack);
            prop_assert_eq!(parsed.payout, spin.payout);
            state = spin.state;
        }
    }
}
