//! Game state and move execution.
//!
//! A [`Position`] bundles everything the rule engine needs to decide what
//! may happen next: the board, the side to move, the piece that must keep
//! jumping (if a multi-jump is in progress) and the rule variant. It is a
//! small `Copy` value, so the search can take private copies freely.
//!
//! State changes go through three functions:
//! - [`apply_move`] executes a generated move and returns an [`Undo`] record
//! - [`undo_move`] reverses it exactly
//! - [`play_move`] validates raw coordinates first and reports why a move
//!   is rejected

use log::debug;

use crate::board::{Board, Color, Piece, in_bounds};
use crate::error::MoveError;
use crate::moves::{Move, Square};
use crate::rules::{
    Rules, all_moves, can_move, check_can_jump, jumps_from, player_has_available_jump,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    /// Side to move.
    pub turn: Color,
    /// Square of the piece that must continue a multi-jump.
    pub chain: Option<Square>,
    pub rules: Rules,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Starting position with White to move.
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Self::from_board(Board::new_game(), Color::White, rules)
    }

    /// Arbitrary set-up with no jump in progress.
    pub fn from_board(board: Board, turn: Color, rules: Rules) -> Self {
        Self {
            board,
            turn,
            chain: None,
            rules,
        }
    }

    /// Restore the starting layout with White to move. The rule variant is kept.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Color::White;
        self.chain = None;
    }

    pub fn is_white_turn(&self) -> bool {
        self.turn == Color::White
    }

    /// Legal moves for the side to move.
    ///
    /// While a multi-jump is in progress only the jumping piece's captures
    /// are legal.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.chain {
            Some((x, y)) => jumps_from(&self.board, self.rules, x, y),
            None => all_moves(&self.board, self.rules, self.turn),
        }
    }
}

/// Information needed to take back a move applied with [`apply_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    /// Value of the moving piece before it moved (before any crowning).
    pub moved: Piece,
    /// Square and value of the jumped piece.
    pub captured: Option<(Square, Piece)>,
    pub turn: Color,
    pub chain: Option<Square>,
}

/// Execute a move without checking its legality.
///
/// The destination takes the moving piece and the source is emptied; a
/// jump also removes the piece in between. A piece landing on its far row
/// is crowned. The turn passes to the other side unless the move was a
/// jump and the same piece can jump again, in which case the jump chain
/// continues from the landing square.
pub fn apply_move(pos: &mut Position, mv: &Move) -> Undo {
    let moved = pos.board.take(mv.from_x, mv.from_y);
    let captured = mv
        .captured_square()
        .map(|(cx, cy)| ((cx, cy), pos.board.take(cx, cy)));

    let landed = match moved.color() {
        Some(color) if mv.to_y == color.king_row() => moved.crowned(),
        _ => moved,
    };
    pos.board.set(mv.to_x, mv.to_y, landed);

    let undo = Undo {
        mv: *mv,
        moved,
        captured,
        turn: pos.turn,
        chain: pos.chain,
    };

    if mv.is_capture && check_can_jump(&pos.board, pos.rules, mv.to_x, mv.to_y) {
        pos.chain = Some(mv.to());
    } else {
        pos.turn = pos.turn.opponent();
        pos.chain = None;
    }
    undo
}

/// Reverse a move previously applied with [`apply_move`].
pub fn undo_move(pos: &mut Position, undo: Undo) {
    let mv = undo.mv;
    pos.board.set(mv.to_x, mv.to_y, Piece::Empty);
    pos.board.set(mv.from_x, mv.from_y, undo.moved);
    if let Some(((cx, cy), piece)) = undo.captured {
        pos.board.set(cx, cy, piece);
    }
    pos.turn = undo.turn;
    pos.chain = undo.chain;
}

/// Validate and play a move given by raw coordinates.
///
/// On success the applied move is returned. On failure the position is
/// left untouched and the reason is reported.
///
/// # Errors
/// - [`MoveError::OutOfBounds`] - a coordinate is off the board
/// - [`MoveError::EmptySource`] - there is no piece to move
/// - [`MoveError::WrongTurn`] - the piece belongs to the side not on move
/// - [`MoveError::ChainInProgress`] - another piece must finish its jumps
/// - [`MoveError::Occupied`] - the target square holds a piece
/// - [`MoveError::InvalidGeometry`] - not a legal step or jump for this piece
/// - [`MoveError::CaptureRequired`] - a step was played while a jump exists
pub fn play_move(
    pos: &mut Position,
    from_x: usize,
    from_y: usize,
    to_x: usize,
    to_y: usize,
) -> Result<Move, MoveError> {
    for (x, y) in [(from_x, from_y), (to_x, to_y)] {
        if !in_bounds(x as isize, y as isize) {
            return Err(MoveError::OutOfBounds { x, y });
        }
    }

    let piece = pos.board.get(from_x, from_y);
    if piece.is_empty() {
        return Err(MoveError::EmptySource { x: from_x, y: from_y });
    }
    if piece.color() != Some(pos.turn) {
        return Err(MoveError::WrongTurn { turn: pos.turn });
    }
    if let Some(square) = pos.chain {
        if square != (from_x, from_y) {
            return Err(MoveError::ChainInProgress { square });
        }
    }
    if !pos.board.get(to_x, to_y).is_empty() {
        return Err(MoveError::Occupied { x: to_x, y: to_y });
    }
    if !can_move(&pos.board, pos.rules, (from_x, from_y), (to_x, to_y)) {
        return Err(MoveError::InvalidGeometry);
    }

    let is_capture = from_x.abs_diff(to_x) == 2;
    if !is_capture && player_has_available_jump(&pos.board, pos.rules, pos.turn) {
        return Err(MoveError::CaptureRequired);
    }

    let mv = Move::new((from_x, from_y), (to_x, to_y), is_capture, piece);
    let mover = pos.turn;
    apply_move(pos, &mv);
    debug!("{mover} played {mv}");
    Ok(mv)
}
