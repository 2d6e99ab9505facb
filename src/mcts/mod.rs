//! Game-tree search: exhaustive minimax, pure Monte Carlo tree search and
//! AlphaZero-style search guided by a batched value/policy predictor.

pub mod alpha_zero;
pub mod batch_evaluator;
pub mod hyperparameters;
pub mod minimax;
pub mod monte_carlo;
pub mod predictor;
pub mod tree;

pub use alpha_zero::{AlphaZeroSearch, AlphaZeroStats};
pub use batch_evaluator::{BatchEvaluator, EvaluationSink, Submission};
pub use hyperparameters::SearchConfig;
pub use minimax::{MinimaxSearch, MinimaxStats};
pub use monte_carlo::{MonteCarloSearch, MonteCarloStats};
pub use predictor::{ActionProbs, HeuristicPredictor, Prediction, Predictor, UniformPredictor};
pub use tree::{Node, NodeId, SearchTree};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f64),

    #[error("node has no children to choose from")]
    NoChildren,

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("predictor answered {actual} predictions for {expected} states")]
    PredictionCount { expected: usize, actual: usize },

    #[error("predicted value {0} is outside [-1, 1]")]
    ValueOutOfRange(f64),

    #[error("predictor failed: {0}")]
    Predictor(String),
}
