//! An arena for playing and benchmarking 'Connect 4' agents
//!
//! Human and automated players can be matched against each other on a
//! gravity-drop board of configurable size. The automated players range
//! from uniform random play up to fixed-depth minimax and alpha-beta
//! search over a heuristic position evaluation.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_arena::{AiPlayer, ConnectFour, Game, MinimaxPlayer};
//!
//! let mut game = ConnectFour::new(6, 7);
//! game.make_move(4);
//!
//! let mut ai = MinimaxPlayer::new(3);
//! let column = ai.choose_move(&game);
//!
//! assert!(column.is_some());
//! ```

use static_assertions::*;
pub use anyhow;

pub mod game;

pub mod connect_four;

pub mod evaluator;

pub mod search;

pub mod players;

pub mod stats;

pub mod manager;

mod test;

pub use crate::connect_four::ConnectFour;
pub use crate::game::{Cell, Game, GameState, Move, Player};
pub use crate::manager::{GameManager, Seat};
pub use crate::players::{AiPlayer, AlphaBetaPlayer, GreedyPlayer, MinimaxPlayer, RandomPlayer};
pub use crate::search::DEFAULT_DEPTH;

/// The number of aligned tiles needed to win, and the window length
/// scanned by the evaluator
pub const WIN_LENGTH: usize = 4;

/// The smallest board height a game will be constructed with
pub const MIN_ROWS: usize = 4;

/// The smallest board width a game will be constructed with
pub const MIN_COLS: usize = 4;

/// The height of the standard game board in tiles
pub const DEFAULT_ROWS: usize = 6;

/// The width of the standard game board in tiles
pub const DEFAULT_COLS: usize = 7;

// a board smaller than one alignment window is unplayable
const_assert!(MIN_ROWS >= WIN_LENGTH);
const_assert!(MIN_COLS >= WIN_LENGTH);
const_assert!(DEFAULT_ROWS >= MIN_ROWS);
const_assert!(DEFAULT_COLS >= MIN_COLS);
