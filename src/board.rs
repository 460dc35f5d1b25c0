//! Board and cell model.
//!
//! The board is a fixed 8x8 arena of cell values indexed by `(x, y)`, stored
//! row-major. It is a plain `Copy` value, so a clone is a deep, independent
//! copy that shares nothing with the original.

use std::fmt;

use crate::constants::{BLACK_KING_ROW, BOARDSIZE, N, START_ROWS, WHITE_KING_ROW};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Vertical direction in which this side's men advance.
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which this side's men are crowned.
    pub fn king_row(self) -> usize {
        match self {
            Color::White => WHITE_KING_ROW,
            Color::Black => BLACK_KING_ROW,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Value held by a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Piece {
    #[default]
    Empty,
    WhiteMan,
    BlackMan,
    WhiteKing,
    BlackKing,
}

impl Piece {
    pub fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan | Piece::WhiteKing => Some(Color::White),
            Piece::BlackMan | Piece::BlackKing => Some(Color::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    pub fn is_man(self) -> bool {
        matches!(self, Piece::WhiteMan | Piece::BlackMan)
    }

    /// True if both cells hold pieces of opposite colors.
    pub fn is_opponent_of(self, other: Piece) -> bool {
        match (self.color(), other.color()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// The king of the same color. Kings stay kings; `Empty` stays `Empty`.
    pub fn crowned(self) -> Self {
        match self {
            Piece::WhiteMan | Piece::WhiteKing => Piece::WhiteKing,
            Piece::BlackMan | Piece::BlackKing => Piece::BlackKing,
            Piece::Empty => Piece::Empty,
        }
    }

    /// Token used by the text board serialization.
    pub fn token(self) -> &'static str {
        match self {
            Piece::Empty => ".",
            Piece::WhiteMan => "W",
            Piece::BlackMan => "B",
            Piece::WhiteKing => "WK",
            Piece::BlackKing => "BK",
        }
    }
}

/// A snapshot of one square: its position and its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub value: Piece,
}

/// True for dark squares, the only ones pieces may stand on.
#[inline]
pub fn is_playable(x: usize, y: usize) -> bool {
    (x + y) % 2 == 1
}

#[inline]
pub fn in_bounds(x: isize, y: isize) -> bool {
    x >= 0 && y >= 0 && (x as usize) < N && (y as usize) < N
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Piece; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [Piece::Empty; BOARDSIZE],
        }
    }

    /// The canonical starting layout: Black men on rows 0-2, White men on
    /// rows 5-7, dark squares only.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Restore the starting layout in place.
    pub fn reset(&mut self) {
        for y in 0..N {
            for x in 0..N {
                let value = if !is_playable(x, y) {
                    Piece::Empty
                } else if y < START_ROWS {
                    Piece::BlackMan
                } else if y >= N - START_ROWS {
                    Piece::WhiteMan
                } else {
                    Piece::Empty
                };
                self.set(x, y, value);
            }
        }
    }

    #[inline]
    fn idx(x: usize, y: usize) -> usize {
        y * N + x
    }

    /// Value at `(x, y)`. Out-of-bounds reads yield `Empty`.
    pub fn get(&self, x: usize, y: usize) -> Piece {
        if x >= N || y >= N {
            return Piece::Empty;
        }
        self.cells[Self::idx(x, y)]
    }

    /// Overwrite the value at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: Piece) {
        if x >= N || y >= N {
            return;
        }
        self.cells[Self::idx(x, y)] = value;
    }

    /// Take the value at `(x, y)`, leaving the cell empty.
    pub fn take(&mut self, x: usize, y: usize) -> Piece {
        let value = self.get(x, y);
        self.set(x, y, Piece::Empty);
        value
    }

    /// Read-only snapshot of all 64 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(i, &value)| Cell {
            x: i % N,
            y: i / N,
            value,
        })
    }

    /// Occupied cells of the given color, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |c| c.value.color() == Some(color))
    }

    pub fn count(&self, value: Piece) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..N {
            write!(f, "{x} ")?;
        }
        writeln!(f)?;
        for y in 0..N {
            write!(f, "{y} ")?;
            for x in 0..N {
                let ch = match self.get(x, y) {
                    Piece::Empty => '.',
                    Piece::WhiteMan => 'w',
                    Piece::BlackMan => 'b',
                    Piece::WhiteKing => 'W',
                    Piece::BlackKing => 'B',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
