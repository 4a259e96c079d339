//! Chess adapter integration tests.

use turnstate::chess::{self, ChessStatus, Side};
use turnstate::{ActionError, Error, Outcome, StateError};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn applied(fen: &str, uci: &str) -> chess::ChessTurn {
    match chess::apply_move(fen, uci) {
        Outcome::Applied(turn) => turn,
        Outcome::Rejected(rejection) => panic!("{uci} rejected: {}", rejection.error),
    }
}

fn rejected(fen: &str, uci: &str) -> Error {
    let rejection = chess::apply_move(fen, uci).into_result().unwrap_err();
    assert_eq!(rejection.state, fen);
    rejection.error
}

#[test]
fn new_game_uses_the_standard_position() {
    assert_eq!(chess::new_game(Side::White), START);
    assert_eq!(
        chess::new_game(Side::Black),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn pawn_push() {
    let turn = applied(START, "e2e4");
    assert_eq!(
        turn.fen,
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
    assert_eq!(turn.san, "e4");
    assert_eq!(turn.uci, "e2e4");
    assert_eq!(turn.turn, Side::Black);
    assert!(!turn.check);
    assert_eq!(turn.status, ChessStatus::InProgress);
}

#[test]
fn uci_is_trimmed_and_lowercased() {
    let turn = applied(START, "  G1F3 ");
    assert_eq!(turn.uci, "g1f3");
    assert_eq!(turn.san, "Nf3");
}

#[test]
fn castling_reports_standard_uci() {
    let turn = applied("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1");
    assert_eq!(turn.uci, "e1g1");
    assert_eq!(turn.san, "O-O");
}

#[test]
fn promotion_with_check() {
    let turn = applied("8/P7/8/8/8/8/8/k6K w - - 0 1", "A7A8Q");
    assert_eq!(turn.uci, "a7a8q");
    assert_eq!(turn.san, "a8=Q+");
    assert!(turn.check);
    assert_eq!(turn.status, ChessStatus::Check);
}

#[test]
fn checkmate() {
    let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    let turn = applied(fen, "d8h4");
    assert_eq!(turn.san, "Qh4#");
    assert_eq!(turn.status, ChessStatus::Checkmate);
    assert!(turn.check);
    assert_eq!(turn.turn, Side::White);
    assert_eq!(
        turn.fen,
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
    );
    assert!(chess::legal_moves_uci(&turn.fen).is_empty());

    let snapshot = chess::snapshot(&turn.fen).unwrap();
    assert_eq!(snapshot.status, ChessStatus::Checkmate);
}

#[test]
fn stalemate() {
    let turn = applied("7k/8/6K1/8/8/8/5Q2/8 w - - 0 1", "f2f7");
    assert_eq!(turn.san, "Qf7");
    assert_eq!(turn.status, ChessStatus::Stalemate);
    assert!(!turn.check);
}

#[test]
fn illegal_and_malformed_moves() {
    assert_eq!(rejected(START, "e2e5"), Error::Action(ActionError::IllegalMove));
    assert_eq!(rejected(START, "e1e2"), Error::Action(ActionError::IllegalMove));
    for uci in ["", "e2", "e9e4", "i2i4", "e2e4x", "e7e8k"] {
        assert_eq!(rejected(START, uci), Error::Action(ActionError::MoveFormat), "{uci:?}");
    }
}

#[test]
fn invalid_fen_is_rejected_before_parsing() {
    assert_eq!(
        chess::parse_position("   ").unwrap_err(),
        StateError::Fen("missing".to_owned())
    );
    assert_eq!(
        chess::parse_position(&"8".repeat(201)).unwrap_err(),
        StateError::Fen("too long".to_owned())
    );
    assert_eq!(
        chess::parse_position("8/8/8/8/8/8/8/8\nw - - 0 1").unwrap_err(),
        StateError::Fen("contains control characters".to_owned())
    );
    assert!(matches!(
        chess::parse_position("not a position"),
        Err(StateError::Fen(_))
    ));
    assert!(matches!(
        rejected("not a position", "e2e4"),
        Error::State(StateError::Fen(_))
    ));
    assert_eq!(
        chess::parse_position("").unwrap_err().to_string(),
        "invalid FEN: missing"
    );
}

#[test]
fn legal_moves_and_candidates() {
    assert_eq!(chess::legal_moves_uci(START).len(), 20);
    assert!(chess::legal_moves_uci(START).contains(&"e2e4".to_owned()));
    assert!(chess::legal_moves_uci("garbage").is_empty());

    assert_eq!(chess::opponent_candidates(START, 5).len(), 5);
    assert_eq!(chess::opponent_candidates(START, 0).len(), 20);
    assert_eq!(chess::default_opponent_candidates(START).len(), 20);
}

#[test]
fn opponent_choice_must_be_offered() {
    let offered = vec!["e2e4".to_owned()];

    let accepted = chess::revalidate_opponent_choice(START, "e2e4", Some(offered.as_slice()));
    assert!(accepted.is_legal());

    let refused = chess::revalidate_opponent_choice(START, "d2d4", Some(offered.as_slice()))
        .into_result()
        .unwrap_err();
    assert_eq!(refused.state, START);
    assert_eq!(refused.error, Error::Action(ActionError::NotOffered));

    assert!(chess::revalidate_opponent_choice(START, "d2d4", None).is_legal());

    let illegal = chess::revalidate_opponent_choice(START, "d2d5", None)
        .into_result()
        .unwrap_err();
    assert_eq!(illegal.error, Error::Action(ActionError::IllegalMove));
}

#[test]
fn snapshot_reports_check() {
    let snapshot = chess::snapshot("4k3/8/8/8/8/8/8/4K2R b - - 0 1").unwrap();
    assert_eq!(snapshot.turn, Side::Black);
    assert!(!snapshot.check);

    let checked = chess::snapshot("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    assert!(checked.check);
    assert_eq!(checked.status, ChessStatus::Check);
}
