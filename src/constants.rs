//! Constants for board geometry, search parameters, and evaluation weights.
//!
//! This module contains the compile-time configuration of the engine.
//! Runtime knobs (rule variant, search depth, RNG seed) live in
//! [`crate::rules::Rules`] and [`crate::search::SearchConfig`] and default
//! to the values below.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). English draughts is always played on 8x8.
pub const N: usize = 8;

/// Total number of cells in the board arena.
pub const BOARDSIZE: usize = N * N;

/// Number of rows filled with men at the start of a game, per side.
pub const START_ROWS: usize = 3;

/// Pieces per side in the initial layout.
pub const PIECES_PER_SIDE: usize = START_ROWS * N / 2;

/// Row on which White men are crowned.
pub const WHITE_KING_ROW: usize = 0;

/// Row on which Black men are crowned.
pub const BLACK_KING_ROW: usize = N - 1;

/// Diagonal unit directions (dx, dy).
/// Order: NW, NE, SW, SE (north is towards row 0).
pub const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax depth (plies searched below each candidate move).
pub const DEFAULT_DEPTH: u32 = 5;

/// Score returned when White has no legal move (White to move, White lost).
pub const SCORE_WHITE_LOST: i32 = i32::MIN;

/// Score returned when Black has no legal move (Black to move, Black lost).
pub const SCORE_BLACK_LOST: i32 = i32::MAX;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Material value of a man.
pub const MAN_VALUE: i32 = 100;

/// Material value of a king.
pub const KING_VALUE: i32 = 200;

/// Bonus for a man standing in the central region.
pub const CENTER_BONUS: i32 = 10;

/// Lowest row or column of the central region.
pub const CENTER_MIN: usize = 2;

/// Highest row or column of the central region (inclusive).
pub const CENTER_MAX: usize = 5;
