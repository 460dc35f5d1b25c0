//! Error types for move validation.

use thiserror::Error;

use crate::board::Color;
use crate::moves::Square;

/// Reasons a submitted move is rejected. The position is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Illegal move: square ({x}, {y}) is off the board")]
    OutOfBounds { x: usize, y: usize },

    #[error("Illegal move: no piece at ({x}, {y})")]
    EmptySource { x: usize, y: usize },

    #[error("Illegal move: it is {turn}'s turn")]
    WrongTurn { turn: Color },

    #[error("Illegal move: target ({x}, {y}) is occupied")]
    Occupied { x: usize, y: usize },

    #[error("Illegal move: not a legal step or jump")]
    InvalidGeometry,

    #[error("Illegal move: a capture is mandatory")]
    CaptureRequired,

    #[error("Illegal move: the piece at ({}, {}) must continue jumping", .square.0, .square.1)]
    ChainInProgress { square: Square },
}
