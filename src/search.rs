//! Minimax search with alpha-beta pruning.
//!
//! Scores are always from White's point of view: White maximizes, Black
//! minimizes. The search never touches the caller's position; it works on a
//! private copy and walks the tree with [`apply_move`] / [`undo_move`], so no
//! board is allocated per node.
//!
//! Mandatory captures are not searched at all: when the side to move must
//! jump, one of the available jumps is picked uniformly at random.

use log::debug;

use crate::board::{Board, Color, Piece};
use crate::constants::{
    CENTER_BONUS, CENTER_MAX, CENTER_MIN, DEFAULT_DEPTH, KING_VALUE, MAN_VALUE, SCORE_BLACK_LOST,
    SCORE_WHITE_LOST,
};
use crate::moves::Move;
use crate::position::{Position, apply_move, undo_move};

/// Search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each candidate move.
    pub depth: u32,
    /// Seed for the jump-selection RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

/// Static evaluation of a board.
///
/// Material counts 100 per man and 200 per king; every man (not king)
/// standing in the central 4x4 region earns 10 more. Positive favors White.
pub fn evaluate(board: &Board) -> i32 {
    board
        .cells()
        .map(|cell| {
            let value = match cell.value {
                Piece::Empty => return 0,
                Piece::WhiteMan | Piece::BlackMan => {
                    let central = (CENTER_MIN..=CENTER_MAX).contains(&cell.x)
                        && (CENTER_MIN..=CENTER_MAX).contains(&cell.y);
                    if central { MAN_VALUE + CENTER_BONUS } else { MAN_VALUE }
                }
                Piece::WhiteKing | Piece::BlackKing => KING_VALUE,
            };
            match cell.value.color() {
                Some(Color::White) => value,
                _ => -value,
            }
        })
        .sum()
}

/// Move selector for the automated side.
pub struct Searcher {
    config: SearchConfig,
    rng: fastrand::Rng,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            rng,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.config.depth = depth;
    }

    /// Nodes visited by the most recent [`Searcher::select_move`] call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// A new searcher with the same configuration and an RNG derived from
    /// this one, for running a search on another thread.
    pub fn fork(&mut self) -> Self {
        Self {
            config: self.config.clone(),
            rng: self.rng.fork(),
            nodes: 0,
        }
    }

    /// Choose a move for the side to move in `pos`.
    ///
    /// Returns `None` when there is no legal move, which the caller should
    /// treat as a loss for that side.
    pub fn select_move(&mut self, pos: &Position) -> Option<Move> {
        self.nodes = 0;
        let moves = pos.legal_moves();
        if moves.is_empty() {
            debug!("{} has no legal move", pos.turn);
            return None;
        }

        let jumps: Vec<&Move> = moves.iter().filter(|m| m.is_capture).collect();
        if !jumps.is_empty() {
            let pick = *jumps[self.rng.usize(..jumps.len())];
            debug!("{} must capture, picked {pick} among {} jumps", pos.turn, jumps.len());
            return Some(pick);
        }

        let maximize = pos.turn == Color::White;
        let mut scratch = *pos;
        let mut best: Option<(Move, i32)> = None;

        for mv in &moves {
            let undo = apply_move(&mut scratch, mv);
            let score = self.minimax(&mut scratch, self.config.depth, i32::MIN, i32::MAX);
            undo_move(&mut scratch, undo);

            let better = match best {
                None => true,
                Some((_, b)) if maximize => score > b,
                Some((_, b)) => score < b,
            };
            if better {
                best = Some((*mv, score));
            }
        }

        if let Some((mv, score)) = best {
            debug!(
                "{} chose {mv} (score {score}, depth {}, {} nodes)",
                pos.turn, self.config.depth, self.nodes
            );
        }
        best.map(|(mv, _)| mv)
    }

    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// The side to move in `pos` decides whether this node maximizes
    /// (White) or minimizes (Black), so a multi-jump in progress keeps the
    /// same side on move. A side with no legal move scores the extreme
    /// against it. `pos` is restored before returning.
    pub fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return evaluate(&pos.board);
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            return match pos.turn {
                Color::White => SCORE_WHITE_LOST,
                Color::Black => SCORE_BLACK_LOST,
            };
        }

        if pos.turn == Color::White {
            let mut value = i32::MIN;
            for mv in &moves {
                let undo = apply_move(pos, mv);
                let score = self.minimax(pos, depth - 1, alpha, beta);
                undo_move(pos, undo);
                value = value.max(score);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for mv in &moves {
                let undo = apply_move(pos, mv);
                let score = self.minimax(pos, depth - 1, alpha, beta);
                undo_move(pos, undo);
                value = value.min(score);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;

    fn setup(pieces: &[(usize, usize, Piece)], turn: Color) -> Position {
        let mut board = Board::empty();
        for &(x, y, p) in pieces {
            board.set(x, y, p);
        }
        Position::from_board(board, turn, Rules::default())
    }

    fn searcher(depth: u32) -> Searcher {
        Searcher::new(SearchConfig {
            depth,
            seed: Some(7),
        })
    }

    #[test]
    fn test_evaluate_initial_is_balanced() {
        assert_eq!(evaluate(&Board::new_game()), 0);
        assert_eq!(evaluate(&Board::empty()), 0);
    }

    #[test]
    fn test_evaluate_weights() {
        let mut board = Board::empty();
        board.set(0, 7, Piece::WhiteMan);
        assert_eq!(evaluate(&board), 100);

        board.set(3, 4, Piece::WhiteMan);
        assert_eq!(evaluate(&board), 210);

        board.set(2, 3, Piece::WhiteKing);
        assert_eq!(evaluate(&board), 410, "kings get no center bonus");

        board.set(5, 2, Piece::BlackMan);
        board.set(7, 0, Piece::BlackKing);
        assert_eq!(evaluate(&board), 410 - 110 - 200);
    }

    #[test]
    fn test_no_legal_move_returns_none() {
        let pos = setup(
            &[
                (1, 6, Piece::BlackMan),
                (0, 7, Piece::WhiteMan),
                (2, 7, Piece::WhiteMan),
            ],
            Color::Black,
        );
        assert_eq!(searcher(3).select_move(&pos), None);
    }

    #[test]
    fn test_minimax_sentinels() {
        let mut pos = setup(
            &[
                (1, 6, Piece::BlackMan),
                (0, 7, Piece::WhiteMan),
                (2, 7, Piece::WhiteMan),
            ],
            Color::Black,
        );
        assert_eq!(searcher(3).minimax(&mut pos, 2, i32::MIN, i32::MAX), SCORE_BLACK_LOST);

        let mut pos = setup(&[(3, 4, Piece::BlackMan)], Color::White);
        assert_eq!(searcher(3).minimax(&mut pos, 2, i32::MIN, i32::MAX), SCORE_WHITE_LOST);
    }

    #[test]
    fn test_minimax_depth_zero_is_evaluation() {
        let mut pos = Position::new();
        pos.board.set(2, 5, Piece::Empty);
        let expected = evaluate(&pos.board);
        assert_eq!(searcher(3).minimax(&mut pos, 0, i32::MIN, i32::MAX), expected);
    }

    #[test]
    fn test_jumps_are_picked_without_search() {
        let pos = setup(
            &[
                (1, 4, Piece::WhiteMan),
                (5, 4, Piece::WhiteMan),
                (2, 3, Piece::BlackMan),
                (6, 3, Piece::BlackMan),
            ],
            Color::White,
        );
        let jumps = pos.legal_moves();
        let mut s = searcher(5);
        for _ in 0..20 {
            let mv = s.select_move(&pos).expect("a jump is available");
            assert!(mv.is_capture);
            assert!(jumps.contains(&mv));
        }
        assert_eq!(s.nodes(), 0);
    }

    #[test]
    fn test_avoids_hanging_a_piece() {
        // Stepping to (3,4) lets the black man at (4,3) capture it.
        let pos = setup(&[(2, 5, Piece::WhiteMan), (4, 3, Piece::BlackMan)], Color::White);
        let mv = searcher(1).select_move(&pos).expect("white can move");
        assert_eq!(mv, Move::new((2, 5), (1, 4), false, Piece::WhiteMan));
    }

    #[test]
    fn test_black_avoids_hanging_a_piece() {
        // Stepping to (4,3) lets the white man at (3,4) capture it.
        let pos = setup(&[(5, 2, Piece::BlackMan), (3, 4, Piece::WhiteMan)], Color::Black);
        let mv = searcher(1).select_move(&pos).expect("black can move");
        assert_eq!(mv, Move::new((5, 2), (6, 3), false, Piece::BlackMan));
    }

    /// Minimax without pruning, same scoring rules.
    fn full_width(pos: &mut Position, depth: u32) -> i32 {
        if depth == 0 {
            return evaluate(&pos.board);
        }
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return match pos.turn {
                Color::White => SCORE_WHITE_LOST,
                Color::Black => SCORE_BLACK_LOST,
            };
        }
        let mut scores = Vec::with_capacity(moves.len());
        for mv in &moves {
            let undo = apply_move(pos, mv);
            scores.push(full_width(pos, depth - 1));
            undo_move(pos, undo);
        }
        match pos.turn {
            Color::White => scores.into_iter().max().expect("moves is non-empty"),
            Color::Black => scores.into_iter().min().expect("moves is non-empty"),
        }
    }

    #[test]
    fn test_pruning_does_not_change_the_value() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut s = searcher(3);
        let mut checked = 0;
        for _ in 0..8 {
            let mut pos = Position::new();
            for _ in 0..60 {
                let moves = pos.legal_moves();
                if moves.is_empty() {
                    break;
                }
                let mut scratch = pos;
                let pruned = s.minimax(&mut scratch, 3, i32::MIN, i32::MAX);
                assert_eq!(scratch, pos);
                assert_eq!(pruned, full_width(&mut scratch, 3), "at\n{}", pos.board);
                checked += 1;

                let mv = moves[rng.usize(..moves.len())];
                apply_move(&mut pos, &mv);
            }
        }
        assert!(checked > 50);
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        let pos = Position::new();
        let before = pos;
        let mut s = searcher(4);
        let mv = s.select_move(&pos).expect("opening move");
        assert_eq!(pos, before);
        assert!(pos.legal_moves().contains(&mv));
        assert!(s.nodes() > 0);
    }

    #[test]
    fn test_seeded_search_is_reproducible() {
        let pos = setup(
            &[
                (1, 4, Piece::WhiteMan),
                (5, 4, Piece::WhiteMan),
                (2, 3, Piece::BlackMan),
                (6, 3, Piece::BlackMan),
            ],
            Color::White,
        );
        let a: Vec<Move> = {
            let mut s = searcher(2);
            (0..10).filter_map(|_| s.select_move(&pos)).collect()
        };
        let b: Vec<Move> = {
            let mut s = searcher(2);
            (0..10).filter_map(|_| s.select_move(&pos)).collect()
        };
        assert_eq!(a, b);
    }
}
