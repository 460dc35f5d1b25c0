//! Game session: the surface a front end talks to.
//!
//! A [`Game`] owns the live position and a [`Searcher`]. Human moves go
//! through [`Game::move_piece`]; engine moves and hints through the search.
//! The live position is never handed to the search by reference across
//! threads: [`Game::spawn_hint`] copies it into the background job.

use std::thread::{self, JoinHandle};

use anyhow::anyhow;
use log::{debug, info};

use crate::board::{Board, Cell, Color};
use crate::error::MoveError;
use crate::moves::Move;
use crate::position::{Position, apply_move, play_move};
use crate::rules::Rules;
use crate::search::{SearchConfig, Searcher};

/// A search running on a background thread.
///
/// There is no cancellation: once spawned, the search runs to completion.
pub struct HintTask {
    handle: JoinHandle<Option<Move>>,
}

impl HintTask {
    /// Block until the search completes.
    pub fn join(self) -> anyhow::Result<Option<Move>> {
        self.handle
            .join()
            .map_err(|_| anyhow!("hint search thread panicked"))
    }
}

pub struct Game {
    position: Position,
    searcher: Searcher,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(Rules::default(), SearchConfig::default())
    }

    pub fn with_config(rules: Rules, config: SearchConfig) -> Self {
        Self::from_position(Position::with_rules(rules), config)
    }

    /// Resume from an arbitrary position.
    pub fn from_position(position: Position, config: SearchConfig) -> Self {
        Self {
            position,
            searcher: Searcher::new(config),
        }
    }

    /// Start a new game with the same rules and search settings.
    pub fn reset(&mut self) {
        self.position.reset();
        info!("new game");
    }

    /// Play a move for the side to move. Returns false, leaving the game
    /// unchanged, if the move is illegal.
    pub fn move_piece(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize) -> bool {
        match self.try_move(from_x, from_y, to_x, to_y) {
            Ok(_) => true,
            Err(e) => {
                debug!("rejected ({from_x}, {from_y}) to ({to_x}, {to_y}): {e}");
                false
            }
        }
    }

    /// Like [`Game::move_piece`], reporting why a move was rejected.
    pub fn try_move(
        &mut self,
        from_x: usize,
        from_y: usize,
        to_x: usize,
        to_y: usize,
    ) -> Result<Move, MoveError> {
        play_move(&mut self.position, from_x, from_y, to_x, to_y)
    }

    /// The engine's choice for the side to move, without playing it.
    pub fn hint(&mut self) -> Option<Move> {
        self.searcher.select_move(&self.position)
    }

    /// Start a hint search on a background thread.
    pub fn spawn_hint(&mut self) -> HintTask {
        let position = self.position;
        let mut searcher = self.searcher.fork();
        HintTask {
            handle: thread::spawn(move || searcher.select_move(&position)),
        }
    }

    /// Select and play one engine move. `None` if the side to move is stuck.
    pub fn engine_move(&mut self) -> Option<Move> {
        let mv = self.searcher.select_move(&self.position)?;
        apply_move(&mut self.position, &mv);
        info!("engine played {mv}");
        Some(mv)
    }

    /// Let the engine play a whole turn, including every jump of a
    /// multi-jump. Empty if the side to move has no legal move.
    pub fn engine_ply(&mut self) -> Vec<Move> {
        let mover = self.position.turn;
        let mut played = Vec::new();
        while self.position.turn == mover {
            match self.engine_move() {
                Some(mv) => played.push(mv),
                None => break,
            }
        }
        played
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    /// Read-only snapshot of all 64 cells.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.position.board.cells()
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn
    }

    pub fn is_white_turn(&self) -> bool {
        self.position.is_white_turn()
    }

    pub fn searcher_mut(&mut self) -> &mut Searcher {
        &mut self.searcher
    }

    /// The winner, if the side to move has no legal move.
    pub fn winner(&self) -> Option<Color> {
        self.legal_moves()
            .is_empty()
            .then(|| self.position.turn.opponent())
    }
}
