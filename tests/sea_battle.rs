//! Sea battle integration tests.

use turnstate::sea_battle::{self, BOARD_SIZE, Board, Cell, FLEET, SeaBattleState, ShotResult};
use turnstate::{ActionError, Error, GameKind, Seat, StateError, Status, Winner};

fn board_with(ships: &[(usize, usize)]) -> Board {
    let mut board = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for &(row, col) in ships {
        board[row][col] = Cell::Ship;
    }
    board
}

/// Player fleet on A1-B1 and J10; opponent fleet on C3-D3 and F6.
fn skirmish() -> String {
    let empty = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    SeaBattleState {
        player_board: board_with(&[(0, 0), (0, 1), (9, 9)]),
        opponent_board: board_with(&[(2, 2), (2, 3), (5, 5)]),
        player_fog: empty,
        opponent_fog: empty,
        turn: Seat::Player,
        status: Status::InProgress,
        last_action: None,
        winner: None,
    }
    .to_string()
}

fn fire(state: &str, coordinate: &str) -> sea_battle::SeaBattleTurn {
    sea_battle::apply_move(state, coordinate)
        .into_result()
        .unwrap_or_else(|rejection| panic!("{coordinate} rejected: {}", rejection.error))
}

fn rejected(state: &str, coordinate: &str) -> Error {
    let rejection = sea_battle::apply_move(state, coordinate)
        .into_result()
        .unwrap_err();
    assert_eq!(rejection.state, state);
    rejection.error
}

#[test]
fn new_game_places_both_fleets() {
    let state = sea_battle::new_game(11);
    assert_eq!(state, sea_battle::new_game(11));

    let game = SeaBattleState::parse(&state).unwrap();
    let ships = |board: &Board| board.iter().flatten().filter(|cell| **cell == Cell::Ship).count();
    let fleet: usize = FLEET.iter().sum();
    assert_eq!(ships(&game.player_board), fleet);
    assert_eq!(ships(&game.opponent_board), fleet);
    assert_eq!(ships(&game.player_fog), 0);
    assert_eq!(game.turn, Seat::Player);
    assert!(state.ends_with("|T:player|ST:in_progress|LA:-|W:-"));
    assert_eq!(sea_battle::legal_moves(&state).len(), BOARD_SIZE * BOARD_SIZE);
}

#[test]
fn a_full_exchange_until_the_fleet_sinks() {
    let start = skirmish();

    let hit = fire(&start, " c3 ");
    assert_eq!(hit.result, ShotResult::Hit);
    assert_eq!(hit.last_action, "C3:hit");
    assert_eq!(hit.turn, Seat::Opponent);
    let game = SeaBattleState::parse(&hit.state).unwrap();
    assert_eq!(game.player_fog[2][2], Cell::Hit);
    assert_eq!(game.opponent_board[2][2], Cell::Hit);

    let reply = fire(&hit.state, "A1");
    assert_eq!(reply.result, ShotResult::Hit);
    assert_eq!(reply.turn, Seat::Player);

    let sunk = fire(&reply.state, "D3");
    assert_eq!(sunk.result, ShotResult::Sunk(2));
    assert_eq!(sunk.last_action, "D3:sunk(2)");
    assert_eq!(sunk.status, Status::InProgress);

    let miss = fire(&sunk.state, "E5");
    assert_eq!(miss.result, ShotResult::Miss);
    assert_eq!(miss.last_action, "E5:miss");
    let game = SeaBattleState::parse(&miss.state).unwrap();
    assert_eq!(game.opponent_fog[4][4], Cell::Miss);

    let last = fire(&miss.state, "F6");
    assert_eq!(last.result, ShotResult::Sunk(1));
    assert_eq!(last.status, Status::GameOver);
    assert_eq!(last.winner, Some(Winner::Side(Seat::Player)));
    assert_eq!(last.turn, Seat::Player);

    assert_eq!(rejected(&last.state, "G7"), Error::Action(ActionError::GameOver));
}

#[test]
fn each_side_tracks_its_own_shots() {
    let start = skirmish();
    let first = fire(&start, "C3");
    let reply = fire(&first.state, "C3");
    assert_eq!(reply.result, ShotResult::Miss);

    assert_eq!(
        rejected(&reply.state, "c3"),
        Error::Action(ActionError::AlreadyTargeted)
    );

    let moves = sea_battle::legal_moves(&reply.state);
    assert_eq!(moves.len(), BOARD_SIZE * BOARD_SIZE - 1);
    assert!(!moves.contains(&"C3".to_owned()));
    assert_eq!(moves[0], "A1");
    assert_eq!(sea_battle::opponent_candidates(&reply.state, 3), vec!["A1", "B1", "C1"]);
    assert_eq!(sea_battle::default_opponent_candidates(&reply.state).len(), 99);
}

#[test]
fn malformed_coordinates() {
    let state = skirmish();
    let cases = [
        ("K1", ActionError::CoordinateFile),
        ("11", ActionError::CoordinateFile),
        ("A0", ActionError::CoordinateRank),
        ("A11", ActionError::CoordinateRank),
        ("AB", ActionError::CoordinateRank),
        ("A", ActionError::CoordinateFormat),
        ("A100", ActionError::CoordinateFormat),
        ("", ActionError::CoordinateFormat),
    ];
    for (coordinate, expected) in cases {
        assert_eq!(rejected(&state, coordinate), Error::Action(expected), "{coordinate:?}");
    }
}

#[test]
fn malformed_states() {
    let game = GameKind::SeaBattle;
    let state = skirmish();
    let without_fog = state.replace("|OF:", "|XF:");
    assert_eq!(
        SeaBattleState::parse(&without_fog),
        Err(StateError::MissingSegment { game, key: "OF" })
    );

    let bad_cell = state.replacen("P:S", "P:Z", 1);
    assert_eq!(SeaBattleState::parse(&bad_cell), Err(StateError::Cell(game)));
    assert_eq!(rejected(&bad_cell, "A1"), Error::State(StateError::Cell(game)));

    assert!(sea_battle::legal_moves("P:-").is_empty());
}

#[test]
fn state_round_trips() {
    let state = skirmish();
    let turn = fire(&state, "C3");
    let parsed: SeaBattleState = turn.state.parse().unwrap();
    assert_eq!(parsed.to_string(), turn.state);
    assert_eq!(parsed.last_action.as_deref(), Some("C3:hit"));
}
