//! Rule engine: move legality and move generation.
//!
//! Everything here is a pure function of a [`Board`] and a [`Rules`]
//! variant. The side to move and any multi-jump in progress are tracked by
//! [`crate::position::Position`], which builds on these predicates.
//!
//! Men step diagonally forward only (White towards row 0, Black towards
//! row 7). Kings step and jump in all four diagonal directions. Whether
//! men may also capture backwards is decided by [`Rules`].

use crate::board::{Board, Color, Piece, in_bounds};
use crate::constants::DIAGONALS;
use crate::moves::{Move, Square};

/// Rule variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Men may jump backwards as well as forwards.
    pub men_capture_backward: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            men_capture_backward: true,
        }
    }
}

impl Rules {
    /// Strict English rules: men capture forward only.
    pub fn english() -> Self {
        Self {
            men_capture_backward: false,
        }
    }
}

/// True if `piece` may take a simple step with vertical direction `dy`.
fn step_allowed(piece: Piece, dy: isize) -> bool {
    if piece.is_king() {
        return true;
    }
    piece.color().is_some_and(|c| c.forward() == dy)
}

/// True if `piece` may jump with vertical direction `dy` under `rules`.
fn jump_allowed(rules: Rules, piece: Piece, dy: isize) -> bool {
    if piece.is_king() || (piece.is_man() && rules.men_capture_backward) {
        return true;
    }
    piece.color().is_some_and(|c| c.forward() == dy)
}

/// Offset a square by `(dx, dy)` scaled by `k`, if the result is on the board.
#[inline]
fn offset(sq: Square, dx: isize, dy: isize, k: isize) -> Option<Square> {
    let x = sq.0 as isize + dx * k;
    let y = sq.1 as isize + dy * k;
    in_bounds(x, y).then_some((x as usize, y as usize))
}

/// Check whether the piece on `from` may move to `to`.
///
/// Rejects an empty source or an occupied target. A distance-one diagonal
/// is a step and must respect the man's forward direction; a distance-two
/// diagonal is a jump and needs an opposing piece on the square between.
pub fn can_move(board: &Board, rules: Rules, from: Square, to: Square) -> bool {
    if !in_bounds(from.0 as isize, from.1 as isize) || !in_bounds(to.0 as isize, to.1 as isize) {
        return false;
    }
    let piece = board.get(from.0, from.1);
    if piece.is_empty() || !board.get(to.0, to.1).is_empty() {
        return false;
    }

    let dx = to.0 as isize - from.0 as isize;
    let dy = to.1 as isize - from.1 as isize;

    match (dx.abs(), dy.abs()) {
        (1, 1) => step_allowed(piece, dy),
        (2, 2) => {
            let mid = board.get((from.0 + to.0) / 2, (from.1 + to.1) / 2);
            mid.is_opponent_of(piece) && jump_allowed(rules, piece, dy.signum())
        }
        _ => false,
    }
}

/// Check whether the piece at `(x, y)` has at least one jump available.
pub fn check_can_jump(board: &Board, rules: Rules, x: usize, y: usize) -> bool {
    let piece = board.get(x, y);
    if piece.is_empty() {
        return false;
    }
    DIAGONALS.iter().any(|&(dx, dy)| {
        let (Some(mid), Some(land)) = (offset((x, y), dx, dy, 1), offset((x, y), dx, dy, 2)) else {
            return false;
        };
        board.get(land.0, land.1).is_empty()
            && board.get(mid.0, mid.1).is_opponent_of(piece)
            && jump_allowed(rules, piece, dy)
    })
}

/// Check whether any piece of `color` has a jump available.
pub fn player_has_available_jump(board: &Board, rules: Rules, color: Color) -> bool {
    board
        .pieces(color)
        .any(|c| check_can_jump(board, rules, c.x, c.y))
}

/// Generate the steps and jumps of the single piece at `(x, y)`.
///
/// Steps come before jumps for each direction, directions in
/// [`DIAGONALS`] order. No forced-capture filtering is applied here.
pub fn piece_moves(board: &Board, rules: Rules, x: usize, y: usize) -> Vec<Move> {
    let piece = board.get(x, y);
    let mut moves = Vec::new();
    if piece.is_empty() {
        return moves;
    }

    for &(dx, dy) in &DIAGONALS {
        let Some(next) = offset((x, y), dx, dy, 1) else {
            continue;
        };
        let next_value = board.get(next.0, next.1);

        if next_value.is_empty() {
            if step_allowed(piece, dy) {
                moves.push(Move::new((x, y), next, false, piece));
            }
        } else if next_value.is_opponent_of(piece) && jump_allowed(rules, piece, dy) {
            if let Some(land) = offset((x, y), dx, dy, 2) {
                if board.get(land.0, land.1).is_empty() {
                    moves.push(Move::new((x, y), land, true, piece));
                }
            }
        }
    }
    moves
}

/// Jumps available to the single piece at `(x, y)`.
pub fn jumps_from(board: &Board, rules: Rules, x: usize, y: usize) -> Vec<Move> {
    let mut moves = piece_moves(board, rules, x, y);
    moves.retain(|m| m.is_capture);
    moves
}

/// Generate every legal move for `color`, enforcing the forced-capture rule.
///
/// Pieces are scanned in row-major order. Steps are collected until the
/// first jump turns up; at that point the accumulator is cleared and from
/// then on only jumps are kept.
pub fn all_moves(board: &Board, rules: Rules, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut jump_found = false;

    for cell in board.pieces(color) {
        for mv in piece_moves(board, rules, cell.x, cell.y) {
            if mv.is_capture {
                if !jump_found {
                    moves.clear();
                    jump_found = true;
                }
                moves.push(mv);
            } else if !jump_found {
                moves.push(mv);
            }
        }
    }
    moves
}
