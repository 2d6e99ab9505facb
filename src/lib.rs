//! # Connect Four 3D
//!
//! A 4×4×4 connect-four engine with three game-tree searches.
//!
//! ## Features
//!
//! - **Game**: board state, move legality, win detection over the 76 lines and the
//!   eight board symmetries
//! - **Search**: exhaustive minimax, pure Monte Carlo tree search with UCT, and
//!   AlphaZero-style PUCT search fed by a batched value/policy predictor
//! - **Players**: random, greedy, minimax, Monte Carlo and AlphaZero players and a
//!   two-player game driver
//! - **Recording**: JSON game records and self-play for training data
//!
//! ## Usage
//!
//! ```rust
//! use connect_four_3d::game::{State, TwoPlayerGame};
//! use connect_four_3d::players::{MiniMaxPlayer, RandomPlayer};
//!
//! let mut game = TwoPlayerGame::new(
//!     Box::new(RandomPlayer::new("random", 7)),
//!     Box::new(MiniMaxPlayer::new("minimax", 2)),
//! );
//! let final_state: &State = game.play().unwrap();
//! assert!(final_state.is_end_of_game());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Board, moves and rules
pub mod game;

/// Tree searches and the batch evaluator
pub mod mcts;

/// Move-choosing players
pub mod players;

/// Game records and self-play
pub mod recording;

/// Logger setup for the binary
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{Action, Color, GameError, State, TwoPlayerGame};
pub use mcts::{SearchConfig, SearchError};
pub use players::{Player, PlayerKind};

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConnectFourError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

pub type Result<T> = std::result::Result<T, ConnectFourError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
