//! A minimax agent for playing the board game 'Connect 4'
//!
//! The agent searches every line of play to a fixed depth and scores the
//! leaves with a static heuristic rewarding runs of pieces.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{Board, Engine, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("112233")?;
//! let mut engine = Engine::new(3);
//!
//! assert_eq!(engine.choose_move(&board, Player::PlayerOne), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod engine;


pub use board::{Board, Cell, Move, Player};
pub use engine::Engine;
pub use evaluation::{evaluate, score_for};

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The default number of plies searched after the engine's own move
pub const DEFAULT_DEPTH: usize = 3;

// a default game must be winnable in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
