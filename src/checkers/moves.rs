use std::collections::BTreeSet;

use tracing::trace;

use super::{Board, Cell, CheckersState, Color, Square};

const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Moves for the side to move, split by kind and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    /// Capture sequences, each ending where the capturing piece stops.
    pub captures: Vec<String>,
    /// Single diagonal steps onto empty squares.
    pub simple: Vec<String>,
}

impl MoveSet {
    /// Returns whether a capture is available, which forbids simple moves.
    #[must_use]
    pub fn must_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// Applies the forced-capture rule.
    #[must_use]
    pub fn into_legal(self) -> Vec<String> {
        if self.must_capture() {
            self.captures
        } else {
            self.simple
        }
    }
}

/// Diagonal directions a piece may move or capture in.
fn directions(piece: Cell) -> &'static [(isize, isize)] {
    match piece {
        Cell::King(_) => &DIAGONALS,
        Cell::Man(Color::White) => &DIAGONALS[..2],
        Cell::Man(Color::Black) => &DIAGONALS[2..],
        Cell::Empty => &[],
    }
}

const fn at(board: &Board, square: Square) -> Cell {
    board[square.row][square.col]
}

impl CheckersState {
    /// Collects every capture sequence and simple move for the side to move.
    #[must_use]
    pub fn all_moves(&self) -> MoveSet {
        let mut captures = BTreeSet::new();
        let mut simple = BTreeSet::new();

        for (row, cells) in self.board.iter().enumerate() {
            for (col, &piece) in cells.iter().enumerate() {
                if piece.color() != Some(self.turn) {
                    continue;
                }
                let Some(from) = Square::new(row, col) else {
                    continue;
                };
                captures.extend(capture_sequences(&self.board, from, piece));
                simple.extend(simple_moves(&self.board, from, piece));
            }
        }

        MoveSet {
            captures: captures.into_iter().collect(),
            simple: simple.into_iter().collect(),
        }
    }
}

fn simple_moves(board: &Board, from: Square, piece: Cell) -> Vec<String> {
    directions(piece)
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|to| to.is_dark() && at(board, *to) == Cell::Empty)
        .map(|to| format!("{from}{to}"))
        .collect()
}

/// Enumerates every maximal capture chain for `piece` standing on `from`.
///
/// Each jump is played on a copy of the board before searching on. A man
/// that is crowned by a jump stops there; a piece that was already a king
/// keeps jumping.
fn capture_sequences(board: &Board, from: Square, piece: Cell) -> Vec<String> {
    let mut sequences = Vec::new();

    for &(dr, dc) in directions(piece) {
        let (Some(over), Some(to)) = (from.offset(dr, dc), from.offset(dr * 2, dc * 2)) else {
            continue;
        };
        if !to.is_dark() || at(board, to) != Cell::Empty {
            continue;
        }
        let Some(captured) = at(board, over).color() else {
            continue;
        };
        if Some(captured) == piece.color() {
            continue;
        }

        let landed = piece.crowned_on(to.row);
        let mut next = *board;
        next[from.row][from.col] = Cell::Empty;
        next[over.row][over.col] = Cell::Empty;
        next[to.row][to.col] = landed;

        if landed != piece && !piece.is_king() {
            trace!(%from, %to, "crowned mid-capture");
            sequences.push(format!("{from}{to}"));
            continue;
        }

        let continuations = capture_sequences(&next, to, landed);
        if continuations.is_empty() {
            sequences.push(format!("{from}{to}"));
        } else {
            sequences.extend(continuations.into_iter().map(|rest| format!("{from}{rest}")));
        }
    }

    sequences
}
