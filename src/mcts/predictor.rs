//! The value/policy evaluator consulted by the AlphaZero search.
//!
//! A predictor receives a batch of positions and answers, in the same order, one
//! value in `[-1, 1]` seen by the player to move and one probability per action
//! slot. Slots of illegal moves are present too; the search only reads legal ones.

use crate::game::analyzer::{player_value, WIN_SCORE};
use crate::game::{Action, State, ACTION_COUNT};
use crate::mcts::SearchError;

/// Probability per action slot, indexed by [`Action::to_int`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionProbs([f64; ACTION_COUNT]);

impl ActionProbs {
    pub fn new(probs: [f64; ACTION_COUNT]) -> Self {
        Self(probs)
    }

    pub fn uniform() -> Self {
        Self([1.0 / ACTION_COUNT as f64; ACTION_COUNT])
    }

    pub fn get(&self, action: Action) -> f64 {
        self.0[action.to_int()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
    pub action_probs: ActionProbs,
}

pub trait Predictor {
    fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError>;
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError> {
        (**self).predict(states)
    }
}

/// Zero value and a flat policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPredictor;

impl Predictor for UniformPredictor {
    fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError> {
        Ok(states
            .iter()
            .map(|_| Prediction {
                value: 0.0,
                action_probs: ActionProbs::uniform(),
            })
            .collect())
    }
}

/// Stand-in for a trained network, built on [`player_value`].
///
/// The value squashes the heuristic through `tanh(v / scale)`; the policy is a
/// softmax over the heuristic after each legal move, also divided by `scale`.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPredictor {
    pub scale: f64,
}

impl Default for HeuristicPredictor {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

impl HeuristicPredictor {
    fn predict_one(&self, state: &State) -> Prediction {
        let mover = state.next_color();
        let value = (player_value(state, mover) / self.scale).tanh();

        let mut logits = [f64::NEG_INFINITY; ACTION_COUNT];
        for (action, next) in state.successors() {
            // Wins are clamped so the softmax stays finite.
            let gain = player_value(&next, mover).min(WIN_SCORE / 2.0);
            logits[action.to_int()] = gain / self.scale;
        }
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut probs = [0.0; ACTION_COUNT];
        if max.is_finite() {
            let mut sum = 0.0;
            for (p, &logit) in probs.iter_mut().zip(logits.iter()) {
                *p = (logit - max).exp();
                sum += *p;
            }
            for p in probs.iter_mut() {
                *p /= sum;
            }
        }
        Prediction {
            value,
            action_probs: ActionProbs::new(probs),
        }
    }
}

impl Predictor for HeuristicPredictor {
    fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError> {
        Ok(states.iter().map(|state| self.predict_one(state)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_predictor_answers_every_state() {
        let states = vec![State::empty(); 3];
        let predictions = UniformPredictor.predict(&states).unwrap();
        assert_eq!(predictions.len(), 3);
        let total: f64 = predictions[0].action_probs.as_slice().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_predictor_prefers_the_winning_move() {
        let mut state = State::empty();
        for (x, y) in [(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (1, 0)] {
            state = state.take_action(Action::new(x, y)).unwrap();
        }
        let prediction = HeuristicPredictor::default().predict(&[state]).unwrap()[0];
        let winning = prediction.action_probs.get(Action::new(0, 0));
        assert!(winning > 0.99, "winning move prior {winning}");
        assert!(prediction.value.abs() <= 1.0);
        let total: f64 = prediction.action_probs.as_slice().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_predictor_zeroes_illegal_slots() {
        let mut state = State::empty();
        for _ in 0..4 {
            state = state.take_action(Action::new(2, 2)).unwrap();
        }
        let prediction = HeuristicPredictor::default().predict(&[state]).unwrap()[0];
        assert_eq!(prediction.action_probs.get(Action::new(2, 2)), 0.0);
    }
}
