//! Players that pick moves, from uniformly random to AlphaZero-style search.

pub mod alpha_zero;
pub mod greedy;
pub mod minimax;
pub mod monte_carlo;
pub mod random;

pub use alpha_zero::AlphaZeroPlayer;
pub use greedy::GreedyPlayer;
pub use minimax::MiniMaxPlayer;
pub use monte_carlo::MonteCarloPlayer;
pub use random::RandomPlayer;

use crate::game::{Action, State};
use crate::mcts::{HeuristicPredictor, SearchConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Player: Send {
    fn name(&self) -> &str;

    /// Chooses a legal move for the side to move in `state`.
    fn next_action(&mut self, state: &State) -> crate::Result<Action>;

    /// Shown every position reached in the game, whoever moved.
    fn observe(&mut self, _state: &State) {}

    /// Search policy behind the last move, for players that have one.
    fn last_policy(&self) -> Option<&[(Action, f64)]> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    Random,
    Greedy,
    Minimax,
    MonteCarlo,
    AlphaZero,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Random => "random",
            PlayerKind::Greedy => "greedy",
            PlayerKind::Minimax => "minimax",
            PlayerKind::MonteCarlo => "monte-carlo",
            PlayerKind::AlphaZero => "alpha-zero",
        };
        f.write_str(name)
    }
}

/// Builds a player of the given kind. The AlphaZero player is guided by the
/// line-counting heuristic, no network is involved.
pub fn build_player(
    kind: PlayerKind,
    name: impl Into<String>,
    config: &SearchConfig,
    seed: u64,
) -> crate::Result<Box<dyn Player>> {
    let name = name.into();
    let player: Box<dyn Player> = match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new(name, seed)),
        PlayerKind::Greedy => Box::new(GreedyPlayer::new(name)),
        PlayerKind::Minimax => Box::new(MiniMaxPlayer::with_config(name, config)),
        PlayerKind::MonteCarlo => Box::new(MonteCarloPlayer::with_config(name, config, seed)),
        PlayerKind::AlphaZero => Box::new(AlphaZeroPlayer::new(
            name,
            HeuristicPredictor::default(),
            config.clone(),
            seed,
        )?),
    };
    Ok(player)
}
