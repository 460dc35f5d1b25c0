//! Move representation.

use std::fmt;

use crate::board::Piece;

/// A square on the board as `(x, y)`.
pub type Square = (usize, usize);

/// A single ply step: a simple diagonal step or a single jump.
///
/// `piece` is the value of the moving piece when the move was generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_x: usize,
    pub from_y: usize,
    pub to_x: usize,
    pub to_y: usize,
    pub is_capture: bool,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: Square, to: Square, is_capture: bool, piece: Piece) -> Self {
        Self {
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
            is_capture,
            piece,
        }
    }

    pub fn from(&self) -> Square {
        (self.from_x, self.from_y)
    }

    pub fn to(&self) -> Square {
        (self.to_x, self.to_y)
    }

    /// Square of the jumped piece, for captures.
    pub fn captured_square(&self) -> Option<Square> {
        self.is_capture
            .then(|| ((self.from_x + self.to_x) / 2, (self.from_y + self.to_y) / 2))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) to ({}, {})",
            self.from_x, self.from_y, self.to_x, self.to_y
        )
    }
}
