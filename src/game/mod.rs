//! The 4×4×4 board: pegs, stones, winning lines and symmetries.

pub mod action;
pub mod analyzer;
pub mod augmentation;
pub mod color;
pub mod lines;
pub mod state;
pub mod two_player_game;

pub use action::{Action, Position};
pub use augmentation::{Augmentation, Rotation};
pub use color::Color;
pub use state::State;
pub use two_player_game::TwoPlayerGame;

/// Side length of the cube.
pub const FOUR: u8 = 4;

/// One action per peg.
pub const ACTION_COUNT: usize = 16;

pub const CELL_COUNT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal action {0}")]
    IllegalAction(Action),

    #[error("the game is already over")]
    GameOver,

    #[error("action index {0} is outside 0..16")]
    InvalidActionIndex(usize),

    #[error("invalid action hex {0:?}")]
    InvalidActionHex(String),
}
