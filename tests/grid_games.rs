//! Tic-tac-toe and four-in-a-row integration tests.

use turnstate::four_in_a_row;
use turnstate::tic_tac_toe::{self, Mark, TicTacToeState};
use turnstate::{ActionError, Error, GameKind, Outcome, Seat, StateError, Status, Winner};

fn rejected<T: std::fmt::Debug>(outcome: Outcome<T>, state: &str) -> Error {
    let rejection = outcome.into_result().unwrap_err();
    assert_eq!(rejection.state, state);
    rejection.error
}

#[test]
fn tic_tac_toe_new_game() {
    assert_eq!(
        tic_tac_toe::new_game(Mark::X),
        "G:.../.../...|T:player|ST:in_progress|LA:-|W:-|P:X|O:O"
    );
    assert_eq!(
        tic_tac_toe::new_game_with_symbol(" o ").unwrap(),
        "G:.../.../...|T:player|ST:in_progress|LA:-|W:-|P:O|O:X"
    );
    assert_eq!(
        tic_tac_toe::new_game_with_symbol("").unwrap(),
        tic_tac_toe::new_game(Mark::X)
    );
    assert_eq!(
        tic_tac_toe::new_game_with_symbol("Z"),
        Err(StateError::Symbol(GameKind::TicTacToe))
    );
}

#[test]
fn tic_tac_toe_alternates_marks() {
    let start = tic_tac_toe::new_game(Mark::X);
    let first = tic_tac_toe::apply_move(&start, "a1").into_result().unwrap();
    assert_eq!(
        first.state,
        "G:X../.../...|T:opponent|ST:in_progress|LA:A1|W:-|P:X|O:O"
    );
    assert_eq!(first.turn, Seat::Opponent);
    assert_eq!(first.last_action, "A1");

    let second = tic_tac_toe::apply_move(&first.state, " b2 ").into_result().unwrap();
    assert_eq!(
        second.state,
        "G:X../.O./...|T:player|ST:in_progress|LA:B2|W:-|P:X|O:O"
    );
}

#[test]
fn tic_tac_toe_player_can_take_o() {
    let start = tic_tac_toe::new_game(Mark::O);
    let turn = tic_tac_toe::apply_move(&start, "C3").into_result().unwrap();
    assert!(turn.state.starts_with("G:.../.../..O|"));
}

#[test]
fn tic_tac_toe_win_keeps_the_turn() {
    let state = "G:XX./OO./...|T:player|ST:in_progress|LA:B2|W:-|P:X|O:O";
    let turn = tic_tac_toe::apply_move(state, "C1").into_result().unwrap();
    assert_eq!(
        turn.state,
        "G:XXX/OO./...|T:player|ST:game_over|LA:C1|W:player|P:X|O:O"
    );
    assert_eq!(turn.winner, Some(Winner::Side(Seat::Player)));
    assert_eq!(turn.status, Status::GameOver);

    let after = tic_tac_toe::apply_move(&turn.state, "C2");
    assert_eq!(
        rejected(after, &turn.state),
        Error::Action(ActionError::GameOver)
    );
}

#[test]
fn tic_tac_toe_full_board_is_a_draw() {
    let state = "G:XOX/XOO/OX.|T:player|ST:in_progress|LA:-|W:-|P:X|O:O";
    let turn = tic_tac_toe::apply_move(state, "C3").into_result().unwrap();
    assert_eq!(turn.winner, Some(Winner::Draw));
    assert!(turn.state.contains("|W:draw|"));
}

#[test]
fn tic_tac_toe_rejections() {
    let state = "G:X../.../...|T:opponent|ST:in_progress|LA:A1|W:-|P:X|O:O";
    let cases = [
        ("A1", ActionError::Occupied),
        ("D1", ActionError::CoordinateFile),
        ("A4", ActionError::CoordinateRank),
        ("A0", ActionError::CoordinateRank),
        ("A", ActionError::CoordinateFormat),
        ("A10", ActionError::CoordinateFormat),
        ("", ActionError::CoordinateFormat),
    ];
    for (square, expected) in cases {
        let outcome = tic_tac_toe::apply_move(state, square);
        assert_eq!(rejected(outcome, state), Error::Action(expected), "{square:?}");
    }
}

#[test]
fn tic_tac_toe_state_errors() {
    let game = GameKind::TicTacToe;
    let cases = [
        ("", StateError::Empty(game)),
        ("T:player", StateError::MissingSegment { game, key: "G" }),
        ("G:../.../...", StateError::RowLength(game)),
        ("G:.../...", StateError::Rows(game)),
        ("G:.../.Z./...", StateError::Cell(game)),
        ("G:.../.../...|T:dealer", StateError::Turn(game)),
        ("G:.../.../...|W:someone", StateError::Winner(game)),
        ("G:.../.../...|P:X|O:X", StateError::Symbol(game)),
        ("G:.../.../...|P:Q", StateError::Symbol(game)),
    ];
    for (state, expected) in cases {
        assert_eq!(TicTacToeState::parse(state), Err(expected), "{state:?}");
    }
    assert_eq!(
        StateError::MissingSegment { game, key: "G" }.to_string(),
        "missing G segment in tic-tac-toe state"
    );
}

#[test]
fn tic_tac_toe_lenient_defaults() {
    let state = TicTacToeState::parse("G:.../.X./...|P:o").unwrap();
    assert_eq!(state.turn, Seat::Player);
    assert_eq!(state.status, Status::InProgress);
    assert_eq!(state.player, Mark::O);
    assert_eq!(state.opponent, Mark::X);
    assert_eq!(
        state.to_string(),
        "G:.../.X./...|T:player|ST:in_progress|LA:-|W:-|P:O|O:X"
    );
}

#[test]
fn tic_tac_toe_legal_moves_in_row_order() {
    let start = tic_tac_toe::new_game(Mark::X);
    let moves = tic_tac_toe::legal_moves(&start);
    assert_eq!(moves.len(), 9);
    assert_eq!(&moves[..4], ["A1", "B1", "C1", "A2"]);
    assert_eq!(tic_tac_toe::opponent_candidates(&start, 2), vec!["A1", "B1"]);
    assert_eq!(tic_tac_toe::default_opponent_candidates(&start).len(), 9);
    assert!(tic_tac_toe::legal_moves("bogus").is_empty());
}

#[test]
fn four_in_a_row_discs_stack() {
    let start = four_in_a_row::new_game();
    assert_eq!(
        start,
        "G:......./......./......./......./......./.......|T:player|ST:in_progress|LA:-|W:-"
    );

    let first = four_in_a_row::apply_move(&start, 4).into_result().unwrap();
    assert_eq!(
        first.state,
        "G:......./......./......./......./......./...R...|T:opponent|ST:in_progress|LA:4|W:-"
    );

    let second = four_in_a_row::apply_move(&first.state, 4).into_result().unwrap();
    assert_eq!(
        second.state,
        "G:......./......./......./......./...Y.../...R...|T:player|ST:in_progress|LA:4|W:-"
    );
}

#[test]
fn four_in_a_row_vertical_win() {
    let state = "G:......./......./......./R....../R....../RYYY...|T:player|ST:in_progress|LA:4|W:-";
    let turn = four_in_a_row::apply_move(state, 1).into_result().unwrap();
    assert_eq!(turn.status, Status::GameOver);
    assert_eq!(turn.winner, Some(Winner::Side(Seat::Player)));
    assert_eq!(turn.turn, Seat::Player);
    assert!(turn.state.starts_with("G:......./......./R....../"));
}

#[test]
fn four_in_a_row_diagonal_win() {
    let state = "G:......./......./......./..RY.../.RYY.../RYYR...|T:player|ST:in_progress|LA:-|W:-";
    let turn = four_in_a_row::apply_move(state, 4).into_result().unwrap();
    assert_eq!(turn.winner, Some(Winner::Side(Seat::Player)));
}

#[test]
fn four_in_a_row_full_board_is_a_draw() {
    let state = "G:RRYYRR./YYRRYYR/RRYYRRY/YYRRYYR/RRYYRRY/YYRRYYR|T:opponent|ST:in_progress|LA:6|W:-";
    let turn = four_in_a_row::apply_move(state, 7).into_result().unwrap();
    assert_eq!(turn.status, Status::GameOver);
    assert_eq!(turn.winner, Some(Winner::Draw));
    assert_eq!(turn.turn, Seat::Opponent);
    assert!(turn.state.ends_with("|T:opponent|ST:game_over|LA:7|W:draw"));
}

#[test]
fn four_in_a_row_rejections() {
    let state = "G:R....../Y....../R....../Y....../R....../Y......|T:player|ST:in_progress|LA:1|W:-";
    assert_eq!(
        rejected(four_in_a_row::apply_move(state, 1), state),
        Error::Action(ActionError::ColumnFull)
    );
    for column in [0, 8] {
        assert_eq!(
            rejected(four_in_a_row::apply_move(state, column), state),
            Error::Action(ActionError::InvalidColumn)
        );
    }
    assert_eq!(four_in_a_row::legal_moves(state), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(four_in_a_row::opponent_candidates(state, 3), vec![2, 3, 4]);
    assert_eq!(four_in_a_row::default_opponent_candidates(state).len(), 6);

    let over = "G:......./......./......./......./......./.......|T:player|ST:game_over|LA:-|W:draw";
    assert_eq!(
        rejected(four_in_a_row::apply_move(over, 1), over),
        Error::Action(ActionError::GameOver)
    );

    let malformed = "G:.......|T:player";
    assert_eq!(
        rejected(four_in_a_row::apply_move(malformed, 1), malformed),
        Error::State(StateError::Rows(GameKind::FourInARow))
    );
    assert!(four_in_a_row::legal_moves(malformed).is_empty());
}
