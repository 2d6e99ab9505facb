//! Search hyperparameters.
//!
//! One serde-friendly struct covers all three searches so a single JSON file can
//! configure a match between any players.

use crate::mcts::SearchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    // ========== Minimax ==========
    /// Plies expanded below the root. Every ply multiplies the tree by up to 16.
    /// Default: 2
    pub minimax_depth: usize,

    /// Refresh ancestor values after every expansion instead of once per search.
    /// Default: true
    pub eager_propagation: bool,

    // ========== Monte Carlo ==========
    /// UCT exploration weight.
    /// Default: 1.0
    pub exploration: f64,

    /// Select/expand/simulate/propagate rounds per move.
    /// Default: 400
    pub monte_carlo_iterations: usize,

    // ========== AlphaZero ==========
    /// PUCT exploration constant, higher is more exploration.
    /// Default: 1.0
    pub c_puct: f64,

    /// Searches per move.
    /// Default: 200
    pub alpha_zero_iterations: usize,

    /// Leaves per predictor call.
    /// Default: 16
    pub batch_size: usize,

    /// Concentration of the root Dirichlet noise. 0.03 puts nearly all the
    /// noise on a single move.
    /// Default: 0.03
    pub dirichlet_alpha: f64,

    /// Share of the noise in the blended root priors.
    /// Default: 0.25
    pub dirichlet_weight: f64,

    /// Blend Dirichlet noise into the root priors (self-play).
    /// Default: false
    pub root_noise: bool,

    /// Standard deviation of the random initial total value of new nodes.
    /// Default: 0.01
    pub initial_value_std: f64,

    // ========== Move selection ==========
    /// Sampling temperature for the opening moves; `None` always plays the most
    /// visited move.
    /// Default: Some(1.0)
    pub temperature: Option<f64>,

    /// Stones on the board after which moves are chosen greedily.
    /// Default: 8
    pub temperature_moves: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            minimax_depth: 2,
            eager_propagation: true,

            exploration: 1.0,
            monte_carlo_iterations: 400,

            c_puct: 1.0,
            alpha_zero_iterations: 200,
            batch_size: 16,
            dirichlet_alpha: 0.03,
            dirichlet_weight: 0.25,
            root_noise: false,
            initial_value_std: 0.01,

            temperature: Some(1.0),
            temperature_moves: 8,
        }
    }
}

impl SearchConfig {
    /// Settings for generating training games: root noise on.
    pub fn self_play() -> Self {
        Self {
            root_noise: true,
            ..Self::default()
        }
    }

    /// Temperature to sample with once `number_of_stones` stones are on the board.
    pub fn get_temperature(&self, number_of_stones: usize) -> Option<f64> {
        if number_of_stones < self.temperature_moves {
            self.temperature
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |msg: &str| Err(SearchError::InvalidConfig(msg.to_string()));
        if self.minimax_depth == 0 {
            return invalid("minimax_depth must be at least 1");
        }
        if self.monte_carlo_iterations == 0 || self.alpha_zero_iterations == 0 {
            return invalid("iteration budgets must be at least 1");
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be at least 1");
        }
        if !(self.exploration >= 0.0 && self.c_puct >= 0.0) {
            return invalid("exploration constants must be non-negative");
        }
        if !(self.dirichlet_alpha > 0.0) {
            return invalid("dirichlet_alpha must be positive");
        }
        if !(0.0..=1.0).contains(&self.dirichlet_weight) {
            return invalid("dirichlet_weight must lie in [0, 1]");
        }
        // Keeps |total_value| below the visit count, so average values stay in [-1, 1].
        if !(0.0..=0.1).contains(&self.initial_value_std) {
            return invalid("initial_value_std must lie in [0, 0.1]");
        }
        if let Some(temperature) = self.temperature {
            if !(temperature > 0.0 && temperature.is_finite()) {
                return Err(SearchError::InvalidTemperature(temperature));
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let config: SearchConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Compact summary for logging.
    pub fn to_config_string(&self) -> String {
        format!(
            "minimax[depth={}]_mc[c={:.2},n={}]_az[c_puct={:.2},n={},batch={},dir={:.2}x{:.2},noise={}]_temp[{:?}<{}]",
            self.minimax_depth,
            self.exploration,
            self.monte_carlo_iterations,
            self.c_puct,
            self.alpha_zero_iterations,
            self.batch_size,
            self.dirichlet_alpha,
            self.dirichlet_weight,
            self.root_noise,
            self.temperature,
            self.temperature_moves
        )
    }
}
