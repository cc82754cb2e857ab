//! A lightweight agent for playing the board game 'Connect 4'
//!
//! The agent keeps a gravity board in sync with the game engine and looks
//! for single-move wins, both its own and the opponent's, before falling
//! back to a random legal column.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_bot::{board::{Board, PlayerId}, threat::winning_column};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::standard();
//! let red = PlayerId::new(1).unwrap();
//! for column in 0..3 {
//!     board.drop_disc(column, red)?;
//! }
//!
//! assert_eq!(winning_column(&board, red), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod serializer;

pub mod threat;

pub mod policy;

pub mod protocol;

pub mod arena;


/// The number of aligned discs needed to win
pub const CONNECT: usize = 4;

/// The width of the standard game board in tiles
pub const WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const HEIGHT: usize = 6;

// a line must fit on the standard board in every orientation
const_assert!(CONNECT >= 2);
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
