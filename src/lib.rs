//! Draughts-Rust: an English draughts (checkers) engine.
//!
//! This crate provides the rules of English draughts (forced captures,
//! multi-jumps, crowning) and a minimax search with alpha-beta pruning that
//! picks moves for an automated opponent.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, search depth, evaluation weights
//! - [`board`] - Board and cell model
//! - [`moves`] - Move representation
//! - [`rules`] - Move legality and move generation
//! - [`position`] - Game state and move execution
//! - [`search`] - Minimax search and static evaluation
//! - [`game`] - Game session for front ends
//! - [`hint`] - Text board exchange with an external advisor
//! - [`dtp`] - Draughts Text Protocol command loop
//! - [`error`] - Move rejection reasons
//!
//! ## Example
//!
//! ```
//! use draughts_rust::game::Game;
//!
//! let mut game = Game::new();
//!
//! // White opens
//! assert!(game.move_piece(2, 5, 3, 4));
//!
//! // Let the engine answer for Black
//! let reply = game.engine_move().expect("black has a move");
//! println!("Engine played {reply}");
//! ```

pub mod board;
pub mod constants;
pub mod dtp;
pub mod error;
pub mod game;
pub mod hint;
pub mod moves;
pub mod position;
pub mod rules;
pub mod search;
