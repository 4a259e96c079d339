//! Chess adapter: FEN in, FEN out, legality from `shakmaty`.
//!
//! The adapter owns input validation and result shaping only. Positions are
//! FEN strings, moves are UCI (`e2e4`, `e7e8q`).

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position};
use tracing::debug;

use crate::codec::{OPPONENT_MOVE_CAP, Token, cap_candidates};
use crate::error::{ActionError, StateError};
use crate::outcome::Outcome;

/// Longest FEN accepted.
pub const MAX_FEN_LENGTH: usize = 200;

const START_BOARD: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// White, written `w`.
    White,
    /// Black, written `b`.
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }
}

impl Token for Side {
    fn token(self) -> &'static str {
        match self {
            Self::White => "w",
            Self::Black => "b",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "w" => Some(Self::White),
            "b" => Some(Self::Black),
            _ => None,
        }
    }
}

/// Position status after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChessStatus {
    /// Play continues; the side to move is not in check.
    InProgress,
    /// Play continues; the side to move is in check.
    Check,
    /// The side to move is mated.
    Checkmate,
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl Token for ChessStatus {
    fn token(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        }
    }

    fn from_token(raw: &str) -> Option<Self> {
        match raw {
            "in_progress" => Some(Self::InProgress),
            "check" => Some(Self::Check),
            "checkmate" => Some(Self::Checkmate),
            "stalemate" => Some(Self::Stalemate),
            _ => None,
        }
    }
}

/// Summary of one applied chess move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessTurn {
    /// FEN after the move.
    pub fen: String,
    /// The move in SAN, with `+` or `#` when it checks or mates.
    pub san: String,
    /// The move in normalized UCI.
    pub uci: String,
    /// Side to move next.
    pub turn: Side,
    /// Whether the side to move is in check.
    pub check: bool,
    /// Position status.
    pub status: ChessStatus,
}

/// Status, side to move, and check flag of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessSnapshot {
    /// Side to move.
    pub turn: Side,
    /// Whether the side to move is in check.
    pub check: bool,
    /// Position status.
    pub status: ChessStatus,
}

impl ChessSnapshot {
    fn of(pos: &Chess) -> Self {
        let status = if pos.is_checkmate() {
            ChessStatus::Checkmate
        } else if pos.is_stalemate() {
            ChessStatus::Stalemate
        } else if pos.is_check() {
            ChessStatus::Check
        } else {
            ChessStatus::InProgress
        };
        Self {
            turn: pos.turn().into(),
            check: pos.is_check(),
            status,
        }
    }
}

/// Returns the standard starting FEN with `side` to move.
#[must_use]
pub fn new_game(side: Side) -> String {
    format!("{START_BOARD} {} KQkq - 0 1", side.token())
}

/// Checks the FEN text before it reaches the parser.
fn validate_fen(fen: &str) -> Result<(), StateError> {
    if fen.trim().is_empty() {
        return Err(StateError::Fen("missing".to_owned()));
    }
    if fen.len() > MAX_FEN_LENGTH {
        return Err(StateError::Fen("too long".to_owned()));
    }
    if fen.contains(['\n', '\r', '\t']) {
        return Err(StateError::Fen("contains control characters".to_owned()));
    }
    Ok(())
}

/// Validates and parses a FEN into a playable position.
///
/// # Errors
///
/// Returns [`StateError::Fen`] for missing, oversized, or control-character
/// input, and for text the rules library rejects.
pub fn parse_position(fen: &str) -> Result<Chess, StateError> {
    validate_fen(fen)?;
    let setup: Fen = fen
        .trim()
        .parse()
        .map_err(|err: shakmaty::fen::ParseFenError| StateError::Fen(err.to_string()))?;
    setup
        .into_position(CastlingMode::Standard)
        .map_err(|err| StateError::Fen(err.to_string()))
}

/// Trims and lowercases UCI text, checking `[a-h][1-8][a-h][1-8][qrbn]?`.
fn normalize_uci(uci: &str) -> Result<String, ActionError> {
    let uci = uci.trim().to_ascii_lowercase();
    let bytes = uci.as_bytes();
    let square = |file: u8, rank: u8| (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank);
    let well_formed = match bytes {
        [f1, r1, f2, r2] => square(*f1, *r1) && square(*f2, *r2),
        [f1, r1, f2, r2, promo] => {
            square(*f1, *r1) && square(*f2, *r2) && matches!(promo, b'q' | b'r' | b'b' | b'n')
        }
        _ => false,
    };
    if well_formed {
        Ok(uci)
    } else {
        Err(ActionError::MoveFormat)
    }
}

/// Returns the status of a FEN position without moving.
///
/// # Errors
///
/// Returns [`StateError::Fen`] for invalid FEN.
pub fn snapshot(fen: &str) -> Result<ChessSnapshot, StateError> {
    parse_position(fen).map(|pos| ChessSnapshot::of(&pos))
}

/// Applies a UCI move to a FEN position.
#[must_use]
pub fn apply_move(fen: &str, uci: &str) -> Outcome<ChessTurn> {
    let mut pos = match parse_position(fen) {
        Ok(pos) => pos,
        Err(err) => {
            debug!(error = %err, "rejected chess position");
            return Outcome::rejected(fen, err);
        }
    };
    let uci = match normalize_uci(uci) {
        Ok(uci) => uci,
        Err(err) => return Outcome::rejected(fen, err),
    };

    let Some(mv) = uci
        .parse::<UciMove>()
        .ok()
        .and_then(|parsed| parsed.to_move(&pos).ok())
    else {
        debug!(uci, "rejected chess move");
        return Outcome::rejected(fen, ActionError::IllegalMove);
    };

    let uci = mv.to_uci(CastlingMode::Standard).to_string();
    let san = SanPlus::from_move_and_play_unchecked(&mut pos, &mv).to_string();
    let snapshot = ChessSnapshot::of(&pos);

    Outcome::Applied(ChessTurn {
        fen: Fen::from_position(pos, EnPassantMode::Legal).to_string(),
        san,
        uci,
        turn: snapshot.turn,
        check: snapshot.check,
        status: snapshot.status,
    })
}

/// Returns every legal move in UCI; invalid FEN yields an empty list.
#[must_use]
pub fn legal_moves_uci(fen: &str) -> Vec<String> {
    parse_position(fen).map_or_else(
        |_| Vec::new(),
        |pos| {
            pos.legal_moves()
                .iter()
                .map(|mv| mv.to_uci(CastlingMode::Standard).to_string())
                .collect()
        },
    )
}

/// Returns up to `limit` legal moves (`0` for all).
#[must_use]
pub fn opponent_candidates(fen: &str, limit: usize) -> Vec<String> {
    cap_candidates(legal_moves_uci(fen), limit)
}

/// Like [`opponent_candidates`] with the default cap of [`OPPONENT_MOVE_CAP`].
#[must_use]
pub fn default_opponent_candidates(fen: &str) -> Vec<String> {
    opponent_candidates(fen, OPPONENT_MOVE_CAP)
}

/// Re-checks a move chosen by an external opponent.
///
/// The move must be legal and, when `allowed` is given, one of the offered
/// candidates; otherwise the full legal list stands in for `allowed`.
#[must_use]
pub fn revalidate_opponent_choice(fen: &str, uci: &str, allowed: Option<&[String]>) -> Outcome<ChessTurn> {
    let outcome = apply_move(fen, uci);
    let Outcome::Applied(turn) = &outcome else {
        return outcome;
    };

    let offered = match allowed {
        Some(allowed) => allowed.iter().any(|candidate| *candidate == turn.uci),
        None => legal_moves_uci(fen).contains(&turn.uci),
    };
    if offered {
        outcome
    } else {
        debug!(uci = turn.uci, "opponent move not offered");
        Outcome::rejected(fen, ActionError::NotOffered)
    }
}
