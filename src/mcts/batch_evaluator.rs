//! Batching of leaf evaluations.
//!
//! Leaves are submitted one at a time and answered through an [`EvaluationSink`].
//! Terminal leaves are answered on the spot. Other leaves wait in a queue that is
//! sent to the [`Predictor`] as one batch once it holds `batch_size` entries.
//!
//! A partial batch is never sent on its own: whoever submits leaves must call
//! [`BatchEvaluator::flush`] before reading results, or the queued leaves are never
//! backed up. Dropping an evaluator with queued leaves logs a warning.

use crate::game::analyzer::winner_value;
use crate::game::State;
use crate::mcts::predictor::{ActionProbs, Predictor};
use crate::mcts::tree::NodeId;
use crate::mcts::SearchError;

/// Receives evaluation results for submitted nodes.
pub trait EvaluationSink {
    /// `action_probs` is `None` for terminal nodes, which have no moves to weigh.
    fn receive_evaluation(&mut self, node: NodeId, value: f64, action_probs: Option<&ActionProbs>);
}

/// What happened to a submitted leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Terminal leaf, already backed up.
    Evaluated,
    /// Waiting for the batch to fill.
    Queued,
    /// The submission completed a batch of this many leaves, all backed up.
    Flushed(usize),
    /// The node was already waiting in the current batch and is not queued twice.
    AlreadyQueued,
}

#[derive(Debug, Clone)]
struct PendingLeaf {
    node: NodeId,
    state: State,
}

#[derive(Debug)]
pub struct BatchEvaluator<P> {
    predictor: P,
    batch_size: usize,
    queue: Vec<PendingLeaf>,
    batches: usize,
}

impl<P: Predictor> BatchEvaluator<P> {
    pub fn new(predictor: P, batch_size: usize) -> Result<Self, SearchError> {
        if batch_size == 0 {
            return Err(SearchError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            predictor,
            batch_size,
            queue: Vec::with_capacity(batch_size),
            batches: 0,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Leaves waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Batches sent to the predictor so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn predictor_mut(&mut self) -> &mut P {
        &mut self.predictor
    }

    /// Submits the leaf `node` holding `state`.
    pub fn simulate<S: EvaluationSink + ?Sized>(
        &mut self,
        node: NodeId,
        state: &State,
        sink: &mut S,
    ) -> Result<Submission, SearchError> {
        if state.is_end_of_game() {
            sink.receive_evaluation(node, Self::evaluate_final_state(state), None);
            return Ok(Submission::Evaluated);
        }
        if self.queue.iter().any(|leaf| leaf.node == node) {
            log::trace!("node {node} already waits in the current batch");
            return Ok(Submission::AlreadyQueued);
        }

        self.queue.push(PendingLeaf {
            node,
            state: *state,
        });
        if self.queue.len() >= self.batch_size {
            self.flush(sink).map(Submission::Flushed)
        } else {
            Ok(Submission::Queued)
        }
    }

    /// Sends every queued leaf to the predictor and backs up the answers.
    ///
    /// Returns how many leaves were evaluated. On error nothing is backed up and the
    /// queue is left intact.
    pub fn flush<S: EvaluationSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, SearchError> {
        if self.queue.is_empty() {
            return Ok(0);
        }
        let states: Vec<State> = self.queue.iter().map(|leaf| leaf.state).collect();
        let predictions = self.predictor.predict(&states)?;
        if predictions.len() != states.len() {
            return Err(SearchError::PredictionCount {
                expected: states.len(),
                actual: predictions.len(),
            });
        }
        if let Some(bad) = predictions
            .iter()
            .find(|p| !p.value.is_finite() || p.value.abs() > 1.0)
        {
            return Err(SearchError::ValueOutOfRange(bad.value));
        }

        let queue = std::mem::take(&mut self.queue);
        for (leaf, prediction) in queue.iter().zip(predictions.iter()) {
            sink.receive_evaluation(leaf.node, prediction.value, Some(&prediction.action_probs));
        }
        self.batches += 1;
        log::trace!("flushed batch #{} of {} leaves", self.batches, queue.len());
        Ok(queue.len())
    }

    /// Drops every queued leaf without evaluating it. Returns how many were dropped.
    ///
    /// Queued node ids belong to one tree; call this before that tree is re-rooted
    /// or replaced after a failed flush.
    pub fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            log::debug!("dropped {dropped} queued leaves");
        }
        dropped
    }

    /// Value of a finished game for the player who would move next.
    pub fn evaluate_final_state(state: &State) -> f64 {
        winner_value(state.winner(), state)
    }
}

impl<P> Drop for BatchEvaluator<P> {
    fn drop(&mut self) {
        if !self.queue.is_empty() {
            log::warn!(
                "batch evaluator dropped with {} unflushed leaves; their values were never backed up",
                self.queue.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;
    use crate::mcts::predictor::{Prediction, UniformPredictor};
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingSink {
        calls: HashMap<NodeId, Vec<(f64, bool)>>,
    }

    impl EvaluationSink for RecordingSink {
        fn receive_evaluation(&mut self, node: NodeId, value: f64, action_probs: Option<&ActionProbs>) {
            self.calls
                .entry(node)
                .or_default()
                .push((value, action_probs.is_some()));
        }
    }

    struct CountingPredictor {
        calls: usize,
        value: f64,
    }

    impl Predictor for CountingPredictor {
        fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError> {
            self.calls += 1;
            Ok(states
                .iter()
                .map(|_| Prediction {
                    value: self.value,
                    action_probs: ActionProbs::uniform(),
                })
                .collect())
        }
    }

    fn won_state() -> State {
        let mut state = State::empty();
        for (x, y) in [(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (1, 0), (0, 0)] {
            state = state.take_action(Action::new(x, y)).unwrap();
        }
        state
    }

    #[test]
    fn test_full_batch_fires_every_callback_once() {
        let mut evaluator =
            BatchEvaluator::new(CountingPredictor { calls: 0, value: 0.5 }, 4).unwrap();
        let mut sink = RecordingSink::default();
        let state = State::empty();

        for node in 0..3 {
            assert_eq!(evaluator.simulate(node, &state, &mut sink).unwrap(), Submission::Queued);
        }
        assert!(sink.calls.is_empty());
        assert_eq!(evaluator.simulate(3, &state, &mut sink).unwrap(), Submission::Flushed(4));

        assert_eq!(evaluator.pending(), 0);
        assert_eq!(evaluator.predictor().calls, 1);
        assert_eq!(sink.calls.len(), 4);
        for calls in sink.calls.values() {
            assert_eq!(calls, &vec![(0.5, true)]);
        }
    }

    #[test]
    fn test_terminal_leaf_is_answered_synchronously() {
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        let mut sink = RecordingSink::default();

        let submission = evaluator.simulate(5, &won_state(), &mut sink).unwrap();

        assert_eq!(submission, Submission::Evaluated);
        assert_eq!(evaluator.pending(), 0);
        assert_eq!(sink.calls[&5], vec![(-1.0, false)]);
    }

    #[test]
    fn test_partial_batch_waits_for_explicit_flush() {
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        let mut sink = RecordingSink::default();
        evaluator.simulate(1, &State::empty(), &mut sink).unwrap();
        evaluator.simulate(2, &State::empty(), &mut sink).unwrap();
        assert!(sink.calls.is_empty());

        assert_eq!(evaluator.flush(&mut sink).unwrap(), 2);
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(evaluator.flush(&mut sink).unwrap(), 0);
    }

    #[test]
    fn test_node_is_not_queued_twice() {
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        let mut sink = RecordingSink::default();
        evaluator.simulate(1, &State::empty(), &mut sink).unwrap();
        let again = evaluator.simulate(1, &State::empty(), &mut sink).unwrap();
        assert_eq!(again, Submission::AlreadyQueued);
        assert_eq!(evaluator.pending(), 1);
        evaluator.flush(&mut sink).unwrap();
        assert_eq!(sink.calls[&1].len(), 1);
    }

    #[test]
    fn test_out_of_range_value_keeps_queue() {
        let mut evaluator =
            BatchEvaluator::new(CountingPredictor { calls: 0, value: 3.0 }, 2).unwrap();
        let mut sink = RecordingSink::default();
        evaluator.simulate(1, &State::empty(), &mut sink).unwrap();
        let result = evaluator.simulate(2, &State::empty(), &mut sink);
        assert_matches!(result, Err(SearchError::ValueOutOfRange(_)));
        assert!(sink.calls.is_empty());
        assert_eq!(evaluator.pending(), 2);
        evaluator.predictor_mut().value = 0.0;
        assert_eq!(evaluator.flush(&mut sink).unwrap(), 2);
    }

    #[test]
    fn test_clear_drops_queued_leaves() {
        let mut evaluator =
            BatchEvaluator::new(CountingPredictor { calls: 0, value: 0.2 }, 8).unwrap();
        let mut sink = RecordingSink::default();
        evaluator.simulate(1, &State::empty(), &mut sink).unwrap();
        evaluator.simulate(2, &State::empty(), &mut sink).unwrap();

        assert_eq!(evaluator.clear(), 2);
        assert_eq!(evaluator.pending(), 0);
        assert_eq!(evaluator.flush(&mut sink).unwrap(), 0);
        assert!(sink.calls.is_empty());
        assert_eq!(evaluator.predictor().calls, 0);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        assert_matches!(
            BatchEvaluator::new(UniformPredictor, 0),
            Err(SearchError::InvalidConfig(_))
        );
    }
}
