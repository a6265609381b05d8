//! A computer opponent for 'Block Four', a Connect 4 variant won by
//! filling a 2x2 block with your own pieces
//!
//! The agent uses a depth-limited minimax search with alpha-beta pruning
//! over a positional heuristic to choose the computer's move.
//!
//! # Basic Usage
//!
//! ```
//! use blockfour_ai::{board::{Board, Piece}, search::{Solver, WIN_SCORE}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! for &(column, piece) in [
//!     (0, Piece::Computer),
//!     (3, Piece::Human),
//!     (0, Piece::Computer),
//!     (4, Piece::Human),
//!     (1, Piece::Computer),
//!     (5, Piece::Human),
//! ].iter() {
//!     board.play(column, piece)?;
//! }
//!
//! let mut solver = Solver::new(board);
//! let (column, score) = solver.solve(1)?;
//!
//! assert!((column, score) == (Some(1), WIN_SCORE));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod heuristic;

pub mod search;

pub mod session;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// a win needs a 2x2 block to fit on the board
const_assert!(WIDTH >= 2 && HEIGHT >= 2);
