//! AlphaZero-style search: PUCT selection guided by a learned value and policy.
//!
//! Values are stored from the point of view of the player to move at each node.
//! A parent choosing among its children therefore negates their average value, and
//! every backed-up value flips sign once per ply on its way to the root.
//!
//! Evaluation is deferred: a search increments visit counts along its path at once,
//! then hands the leaf to a [`BatchEvaluator`]. The value and priors arrive through
//! [`EvaluationSink`] whenever the batch is flushed, possibly several searches later.

use crate::game::{Action, State};
use crate::mcts::batch_evaluator::{BatchEvaluator, EvaluationSink, Submission};
use crate::mcts::hyperparameters::SearchConfig;
use crate::mcts::predictor::{ActionProbs, Predictor};
use crate::mcts::tree::{NodeId, SearchTree};
use crate::mcts::SearchError;
use rand::{Rng, RngExt};
use rand_distr::{Distribution, Gamma, Normal};

#[derive(Debug, Clone, PartialEq)]
pub struct AlphaZeroStats {
    pub is_played: bool,
    /// Blend Dirichlet noise into the children's priors when they are set.
    pub add_dirichlet_noise: bool,
    /// Starts at 1 so the average is defined before any evaluation.
    pub visit_count: u32,
    pub total_value: f64,
    /// Prior of the move leading here, uniform until the parent is evaluated.
    pub action_prob: f64,
}

impl AlphaZeroStats {
    fn new(action_prob: f64, initial_value: f64) -> Self {
        Self {
            is_played: false,
            add_dirichlet_noise: false,
            visit_count: 1,
            total_value: initial_value,
            action_prob,
        }
    }

    pub fn average_value(&self) -> f64 {
        self.total_value / self.visit_count as f64
    }
}

#[derive(Debug, Clone)]
pub struct AlphaZeroSearch<R> {
    tree: SearchTree<AlphaZeroStats>,
    c_puct: f64,
    root_noise: bool,
    dirichlet: Gamma<f64>,
    dirichlet_weight: f64,
    initial_value: Normal<f64>,
    rng: R,
}

impl<R: Rng> AlphaZeroSearch<R> {
    pub fn new(state: State, config: &SearchConfig, mut rng: R) -> Result<Self, SearchError> {
        config.validate()?;
        // Dirichlet(alpha) is sampled as normalised Gamma(alpha, 1) draws.
        let dirichlet = Gamma::new(config.dirichlet_alpha, 1.0)
            .map_err(|e| SearchError::InvalidConfig(format!("dirichlet_alpha: {e:?}")))?;
        let initial_value = Normal::new(0.0, config.initial_value_std)
            .map_err(|e| SearchError::InvalidConfig(format!("initial_value_std: {e:?}")))?;

        let mut root = AlphaZeroStats::new(1.0, initial_value.sample(&mut rng));
        root.add_dirichlet_noise = config.root_noise;
        Ok(Self {
            tree: SearchTree::new(state, root),
            c_puct: config.c_puct,
            root_noise: config.root_noise,
            dirichlet,
            dirichlet_weight: config.dirichlet_weight,
            initial_value,
            rng,
        })
    }

    pub fn tree(&self) -> &SearchTree<AlphaZeroStats> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn stats(&self, id: NodeId) -> &AlphaZeroStats {
        self.tree.stats(id)
    }

    pub fn average_value(&self, id: NodeId) -> f64 {
        self.tree.stats(id).average_value()
    }

    /// One select → expand → evaluate round from the root. The value backup may
    /// happen later, when the evaluator flushes.
    pub fn search<P: Predictor>(
        &mut self,
        evaluator: &mut BatchEvaluator<P>,
    ) -> Result<Submission, SearchError> {
        let selected = self.select(self.root(), self.c_puct);
        self.expand(selected);
        self.lazy_evaluate_and_backup(selected, evaluator)
    }

    /// Runs `iterations` searches, then flushes the evaluator so every submitted
    /// leaf is backed up before the caller reads the statistics.
    ///
    /// On error the evaluator's queue is cleared, so no stale node id outlives a
    /// later re-root. The dropped leaves keep their counted visits without a value;
    /// callers that keep the tree should expect skewed statistics.
    pub fn run<P: Predictor>(
        &mut self,
        iterations: usize,
        evaluator: &mut BatchEvaluator<P>,
    ) -> Result<(), SearchError> {
        let result = (0..iterations)
            .try_for_each(|_| self.search(evaluator).map(|_| ()))
            .and_then(|()| evaluator.flush(self).map(|_| ()));
        if let Err(e) = result {
            let dropped = evaluator.clear();
            log::warn!("az run failed, {dropped} queued leaves dropped: {e}");
            return Err(e);
        }
        log::debug!(
            "az run: {} searches, {} nodes, root value {:.3}",
            iterations,
            self.tree.len(),
            self.average_value(self.root())
        );
        Ok(())
    }

    /// Descends by PUCT from `id` to the first node that is unplayed or terminal.
    pub fn select(&self, id: NodeId, c_puct: f64) -> NodeId {
        let mut current = id;
        loop {
            if !self.tree.stats(current).is_played || self.tree.state(current).is_end_of_game() {
                return current;
            }
            let mut best: Option<(NodeId, f64)> = None;
            for (child, weight) in self.puct_weights(current, c_puct) {
                if best.is_none_or(|(_, best_weight)| weight > best_weight) {
                    best = Some((child, weight));
                }
            }
            match best {
                Some((child, _)) => current = child,
                None => return current,
            }
        }
    }

    /// `-Q(child) + c_puct * P(child) * sqrt(N(id)) / N(child)` for every child of `id`.
    pub fn puct_weights(&self, id: NodeId, c_puct: f64) -> Vec<(NodeId, f64)> {
        let parent_visits = (self.tree.stats(id).visit_count as f64).sqrt();
        self.tree
            .children(id)
            .iter()
            .map(|&(_, child)| {
                let stats = self.tree.stats(child);
                let exploration =
                    c_puct * stats.action_prob * parent_visits / stats.visit_count as f64;
                (child, -stats.average_value() + exploration)
            })
            .collect()
    }

    /// Creates the children of a non-terminal node with uniform priors and marks it
    /// played. Calling it again leaves the children untouched.
    pub fn expand(&mut self, id: NodeId) {
        let state = *self.tree.state(id);
        if !state.is_end_of_game() {
            let prior = 1.0 / state.allowed_actions().len() as f64;
            let rng = &mut self.rng;
            let initial_value = &self.initial_value;
            self.tree.add_children(id, |_, _| {
                AlphaZeroStats::new(prior, initial_value.sample(&mut *rng))
            });
        }
        self.tree.stats_mut(id).is_played = true;
    }

    /// Counts the visit on the whole path now, then submits `id` for evaluation.
    pub fn lazy_evaluate_and_backup<P: Predictor>(
        &mut self,
        id: NodeId,
        evaluator: &mut BatchEvaluator<P>,
    ) -> Result<Submission, SearchError> {
        self.backup_visit_count(id);
        let state = *self.tree.state(id);
        evaluator.simulate(id, &state, self)
    }

    pub fn backup_visit_count(&mut self, id: NodeId) {
        let path: Vec<NodeId> = self.tree.path_to_root(id).collect();
        for node in path {
            self.tree.stats_mut(node).visit_count += 1;
        }
    }

    /// Applies the evaluation of `id`: its children's priors (when given and the
    /// node is not terminal), then `value` to `id` and `-value`, `value`, ... to its
    /// ancestors. Ancestors never receive priors.
    pub fn backup_value(&mut self, id: NodeId, value: f64, action_probs: Option<&ActionProbs>) {
        if let Some(probs) = action_probs {
            if !self.tree.state(id).is_end_of_game() {
                let children = self.tree.children(id).to_vec();
                for (action, child) in children {
                    self.tree.stats_mut(child).action_prob = probs.get(action);
                }
                if self.tree.stats(id).add_dirichlet_noise {
                    self.add_dirichlet_noise_to_action_probs(id);
                }
            }
        }

        let mut value = value;
        let path: Vec<NodeId> = self.tree.path_to_root(id).collect();
        for node in path {
            let stats = self.tree.stats_mut(node);
            stats.total_value += value;
            debug_assert!(
                stats.average_value().abs() <= 1.0,
                "average value {} of node {node} left [-1, 1]",
                stats.average_value()
            );
            value = -value;
        }
    }

    /// Blends Dirichlet noise into the priors of the children of `id`.
    pub fn add_dirichlet_noise_to_action_probs(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.tree.children(id).iter().map(|&(_, c)| c).collect();
        if children.is_empty() {
            return;
        }
        let mut noise = Vec::with_capacity(children.len());
        for _ in &children {
            noise.push(self.dirichlet.sample(&mut self.rng));
        }
        let total: f64 = noise.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            log::debug!("degenerate dirichlet draw at node {id}, priors left unchanged");
            return;
        }
        let weight = self.dirichlet_weight;
        for (child, eta) in children.into_iter().zip(noise) {
            let stats = self.tree.stats_mut(child);
            stats.action_prob = stats.action_prob * (1.0 - weight) + eta / total * weight;
        }
    }

    /// Visit counts of the children of `id` raised to `1 / temperature` and normalised.
    ///
    /// Computed in log space so tiny temperatures concentrate on the most visited
    /// moves instead of overflowing.
    pub fn policy(&self, id: NodeId, temperature: f64) -> Result<Vec<(Action, f64)>, SearchError> {
        if !(temperature > 0.0 && temperature.is_finite()) {
            return Err(SearchError::InvalidTemperature(temperature));
        }
        let children = self.tree.children(id);
        if children.is_empty() {
            return Err(SearchError::NoChildren);
        }
        let log_counts: Vec<f64> = children
            .iter()
            .map(|&(_, child)| (self.tree.stats(child).visit_count as f64).ln())
            .collect();
        let max = log_counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_counts
            .iter()
            .map(|log_count| ((log_count - max) / temperature).exp())
            .collect();
        let sum: f64 = weights.iter().sum();
        Ok(children
            .iter()
            .zip(weights)
            .map(|(&(action, _), weight)| (action, weight / sum))
            .collect())
    }

    /// The most visited move, first in move order on ties.
    pub fn greedy_action(&self, id: NodeId) -> Result<Action, SearchError> {
        let mut best: Option<(Action, u32)> = None;
        for &(action, child) in self.tree.children(id) {
            let visits = self.tree.stats(child).visit_count;
            if best.is_none_or(|(_, best_visits)| visits > best_visits) {
                best = Some((action, visits));
            }
        }
        best.map(|(action, _)| action).ok_or(SearchError::NoChildren)
    }

    /// Greedy without temperature, otherwise a draw from [`AlphaZeroSearch::policy`].
    ///
    /// A finished game has no children, and sampling at its node returns
    /// [`SearchError::NoChildren`]. That error is the terminal answer: callers
    /// check `is_end_of_game` first, as the players do.
    pub fn sample_action(&mut self, id: NodeId, temperature: Option<f64>) -> Result<Action, SearchError> {
        let Some(temperature) = temperature else {
            return self.greedy_action(id);
        };
        let policy = self.policy(id, temperature)?;
        let mut threshold = self.rng.random::<f64>();
        for &(action, probability) in &policy {
            if threshold < probability {
                return Ok(action);
            }
            threshold -= probability;
        }
        // Rounding left a sliver past the last move.
        policy
            .last()
            .map(|&(action, _)| action)
            .ok_or(SearchError::NoChildren)
    }

    pub fn find_state(&self, target: &State) -> Option<NodeId> {
        self.tree.find_state(target)
    }

    /// Keeps the subtree of `id` as the new tree. The evaluator must have been
    /// flushed: queued node ids do not survive.
    ///
    /// With root noise on, a root whose priors already arrived gets the noise
    /// blended in at once; an unevaluated one is flagged for its evaluation.
    pub fn reroot(&mut self, id: NodeId) {
        self.tree.reroot(id);
        let root = self.tree.root();
        if self.root_noise && self.tree.has_children(root) {
            self.add_dirichlet_noise_to_action_probs(root);
        } else {
            self.tree.stats_mut(root).add_dirichlet_noise = self.root_noise;
        }
    }
}

impl<R: Rng> EvaluationSink for AlphaZeroSearch<R> {
    fn receive_evaluation(&mut self, node: NodeId, value: f64, action_probs: Option<&ActionProbs>) {
        self.backup_value(node, value, action_probs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::predictor::{HeuristicPredictor, Prediction, UniformPredictor};
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn search_with(state: State, config: &SearchConfig, seed: u64) -> AlphaZeroSearch<StdRng> {
        AlphaZeroSearch::new(state, config, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn search(seed: u64) -> AlphaZeroSearch<StdRng> {
        search_with(State::empty(), &SearchConfig::default(), seed)
    }

    fn play(moves: &[(u8, u8)]) -> State {
        moves.iter().fold(State::empty(), |state, &(x, y)| {
            state.take_action(Action::new(x, y)).unwrap()
        })
    }

    fn child(az: &AlphaZeroSearch<StdRng>, id: NodeId, x: u8, y: u8) -> NodeId {
        az.tree().child(id, Action::new(x, y)).unwrap()
    }

    #[test]
    fn test_new_node_starts_with_one_visit_and_small_value() {
        let az = search(1);
        let root = az.stats(az.root());
        assert_eq!(root.visit_count, 1);
        assert!(root.total_value.abs() < 0.1);
        assert!(!root.is_played);
    }

    #[test]
    fn test_expand_is_idempotent_with_uniform_priors() {
        let mut az = search(2);
        az.expand(az.root());
        assert_eq!(az.tree().children(az.root()).len(), 16);
        for &(_, c) in az.tree().children(az.root()) {
            assert_eq!(az.stats(c).action_prob, 1.0 / 16.0);
            assert_eq!(az.stats(c).visit_count, 1);
        }
        let before = az.tree().len();
        az.expand(az.root());
        assert_eq!(az.tree().len(), before);
        assert!(az.stats(az.root()).is_played);
    }

    #[test]
    fn test_visits_are_counted_before_the_value_arrives() {
        let mut az = search(3);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 4).unwrap();
        az.expand(az.root());
        let leaf = child(&az, az.root(), 1, 1);
        az.expand(leaf);
        let total_before = az.stats(leaf).total_value;

        let submission = az.lazy_evaluate_and_backup(leaf, &mut evaluator).unwrap();

        assert_eq!(submission, Submission::Queued);
        assert_eq!(az.stats(leaf).visit_count, 2);
        assert_eq!(az.stats(az.root()).visit_count, 2);
        assert_eq!(az.stats(leaf).total_value, total_before);
        evaluator.flush(&mut az).unwrap();
        assert_eq!(evaluator.pending(), 0);
    }

    #[test]
    fn test_backup_value_negates_each_ply_and_sets_priors_once() {
        let mut az = search(4);
        az.expand(az.root());
        let a = child(&az, az.root(), 0, 0);
        az.expand(a);
        let b = child(&az, a, 2, 2);
        let totals: Vec<f64> = [az.root(), a, b].iter().map(|&n| az.stats(n).total_value).collect();

        let mut probs = [0.0; 16];
        probs[Action::new(3, 3).to_int()] = 0.7;
        probs[Action::new(0, 1).to_int()] = 0.3;
        az.backup_value(b, 0.5, Some(&ActionProbs::new(probs)));

        assert!((az.stats(b).total_value - (totals[2] + 0.5)).abs() < 1e-12);
        assert!((az.stats(a).total_value - (totals[1] - 0.5)).abs() < 1e-12);
        assert!((az.stats(az.root()).total_value - (totals[0] + 0.5)).abs() < 1e-12);
        // b was never expanded, so no priors could be written below it.
        assert!(az.tree().children(b).is_empty());
        // Priors of a's children are untouched by b's evaluation.
        for &(_, c) in az.tree().children(a) {
            assert_eq!(az.stats(c).action_prob, 1.0 / 16.0);
        }

        az.backup_value(a, -0.25, Some(&ActionProbs::new(probs)));
        assert_eq!(az.stats(child(&az, a, 3, 3)).action_prob, 0.7);
        assert_eq!(az.stats(child(&az, a, 1, 1)).action_prob, 0.0);
        for &(_, c) in az.tree().children(az.root()) {
            assert_eq!(az.stats(c).action_prob, 1.0 / 16.0);
        }
    }

    #[test]
    fn test_root_noise_keeps_priors_normalised() {
        let config = SearchConfig::self_play();
        let mut az = search_with(State::empty(), &config, 5);
        az.expand(az.root());
        az.backup_value(az.root(), 0.0, Some(&ActionProbs::uniform()));

        let priors: Vec<f64> = az
            .tree()
            .children(az.root())
            .iter()
            .map(|&(_, c)| az.stats(c).action_prob)
            .collect();
        let total: f64 = priors.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        let max = priors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max > 1.0 / 16.0);
        assert!(priors.iter().all(|&p| p >= 0.75 / 16.0 - 1e-12));
    }

    #[test]
    fn test_select_follows_the_prior() {
        let mut az = search(6);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 1).unwrap();
        az.expand(az.root());
        az.lazy_evaluate_and_backup(az.root(), &mut evaluator).unwrap();

        let mut probs = [0.1 / 15.0; 16];
        probs[Action::new(2, 1).to_int()] = 0.9;
        az.backup_value(az.root(), 0.0, Some(&ActionProbs::new(probs)));

        assert_eq!(az.select(az.root(), 1.0), child(&az, az.root(), 2, 1));
    }

    #[test]
    fn test_select_prefers_children_bad_for_the_opponent() {
        let mut az = search(7);
        az.expand(az.root());
        let losing_for_opponent = child(&az, az.root(), 3, 2);
        az.tree.stats_mut(losing_for_opponent).total_value = -0.9;

        // Without exploration only the negated child value counts.
        assert_eq!(az.select(az.root(), 0.0), losing_for_opponent);
    }

    #[test]
    fn test_policy_sums_to_one_and_sharpens_with_low_temperature() {
        let mut az = search(8);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        az.run(100, &mut evaluator).unwrap();
        let root = az.root();

        for temperature in [0.05, 0.5, 1.0, 2.0, 10.0] {
            let total: f64 = az.policy(root, temperature).unwrap().iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-9, "temperature {temperature}");
        }

        // Make one child the unique favourite.
        let favourite = child(&az, root, 1, 2);
        az.tree.stats_mut(favourite).visit_count += 1_000;
        let sharp = az.policy(root, 1e-3).unwrap();
        let (best, p) = sharp
            .iter()
            .copied()
            .fold((Action::new(0, 0), f64::NEG_INFINITY), |a, b| if b.1 > a.1 { b } else { a });
        assert_eq!(best, Action::new(1, 2));
        assert!(p > 0.999);
        assert_eq!(az.sample_action(root, None).unwrap(), best);
        assert_eq!(az.sample_action(root, Some(1e-3)).unwrap(), best);
    }

    #[test]
    fn test_zero_temperature_is_rejected() {
        let mut az = search(9);
        az.expand(az.root());
        assert_matches!(az.policy(az.root(), 0.0), Err(SearchError::InvalidTemperature(_)));
        assert_matches!(
            az.sample_action(az.root(), Some(0.0)),
            Err(SearchError::InvalidTemperature(_))
        );
    }

    #[test]
    fn test_sampling_without_children_fails() {
        let mut az = search(10);
        assert_matches!(az.sample_action(az.root(), None), Err(SearchError::NoChildren));
    }

    #[test]
    fn test_run_flushes_and_counts_every_search_at_the_root() {
        let mut az = search(11);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        az.run(61, &mut evaluator).unwrap();

        assert_eq!(evaluator.pending(), 0);
        assert_eq!(az.stats(az.root()).visit_count, 62);
        for id in 0..az.tree().len() {
            assert!(az.average_value(id).abs() <= 1.0);
        }
    }

    #[test]
    fn test_terminal_leaf_backs_up_the_game_result() {
        let won = play(&[(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (1, 0), (0, 0)]);
        let mut az = search_with(won, &SearchConfig::default(), 12);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 8).unwrap();
        let total_before = az.stats(az.root()).total_value;

        assert_eq!(az.search(&mut evaluator).unwrap(), Submission::Evaluated);
        assert!(az.tree().children(az.root()).is_empty());
        assert_eq!(az.stats(az.root()).visit_count, 2);
        assert!((az.stats(az.root()).total_value - (total_before - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_finds_immediate_win() {
        let state = play(&[(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (2, 3)]);
        let mut az = search_with(state, &SearchConfig::default(), 13);
        let mut evaluator = BatchEvaluator::new(HeuristicPredictor::default(), 4).unwrap();
        az.run(100, &mut evaluator).unwrap();
        assert_eq!(az.sample_action(az.root(), None).unwrap(), Action::new(0, 0));
    }

    #[test]
    fn test_reroot_on_found_state() {
        let config = SearchConfig::self_play();
        let mut az = search_with(State::empty(), &config, 14);
        let mut evaluator = BatchEvaluator::new(UniformPredictor, 4).unwrap();
        az.run(200, &mut evaluator).unwrap();

        let target = State::empty().take_action(Action::new(0, 3)).unwrap();
        let id = az.find_state(&target).unwrap();
        assert!(az.tree().has_children(id));
        let visits = az.stats(id).visit_count;
        az.reroot(id);

        let root = az.root();
        assert_eq!(*az.tree().state(root), target);
        assert_eq!(az.stats(root).visit_count, visits);
        assert_eq!(az.tree().parent(root), None);
        let priors: Vec<f64> = az
            .tree()
            .children(root)
            .iter()
            .map(|&(_, c)| az.stats(c).action_prob)
            .collect();
        assert!((priors.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(priors.iter().any(|&p| (p - 1.0 / 16.0).abs() > 1e-6));
    }

    /// Fails its first batch, then values only the empty board.
    struct FailsOncePredictor {
        failed: bool,
    }

    impl Predictor for FailsOncePredictor {
        fn predict(&mut self, states: &[State]) -> Result<Vec<Prediction>, SearchError> {
            if !self.failed {
                self.failed = true;
                return Err(SearchError::Predictor("backend unavailable".to_string()));
            }
            Ok(states
                .iter()
                .map(|state| Prediction {
                    value: if *state == State::empty() { 0.5 } else { 0.0 },
                    action_probs: ActionProbs::uniform(),
                })
                .collect())
        }
    }

    #[test]
    fn test_failed_run_leaves_nothing_queued_for_the_next_root() {
        let mut az = search(16);
        let mut evaluator = BatchEvaluator::new(FailsOncePredictor { failed: false }, 8).unwrap();

        assert_matches!(az.run(40, &mut evaluator), Err(SearchError::Predictor(_)));
        assert_eq!(evaluator.pending(), 0);

        let next = child(&az, az.root(), 0, 0);
        az.reroot(next);
        az.run(40, &mut evaluator).unwrap();

        // Only the empty board is worth 0.5, and it is no longer in the tree.
        for id in 0..az.tree().len() {
            assert!(az.stats(id).total_value.abs() < 0.4, "node {id}");
        }
    }

    #[test]
    fn test_terminal_node_has_no_action_to_sample() {
        let won = play(&[(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (1, 0), (0, 0)]);
        let mut az = search_with(won, &SearchConfig::default(), 17);
        az.expand(az.root());
        assert_matches!(az.sample_action(az.root(), None), Err(SearchError::NoChildren));
        assert_matches!(az.sample_action(az.root(), Some(1.0)), Err(SearchError::NoChildren));
    }

    #[test]
    fn test_reroot_to_unevaluated_leaf_flags_noise() {
        let config = SearchConfig::self_play();
        let mut az = search_with(State::empty(), &config, 15);
        az.expand(az.root());
        let leaf = child(&az, az.root(), 2, 0);
        az.reroot(leaf);
        assert!(az.stats(az.root()).add_dirichlet_noise);
        assert!(!az.tree().has_children(az.root()));
    }
}
