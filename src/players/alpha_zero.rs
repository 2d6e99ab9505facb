use crate::game::{Action, GameError, State};
use crate::mcts::{AlphaZeroSearch, BatchEvaluator, Predictor, SearchConfig};
use crate::players::Player;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// AlphaZero-style player over any [`Predictor`].
///
/// The search tree survives between moves: the root follows the game through
/// [`AlphaZeroSearch::find_state`] and re-rooting. The visit distribution at the
/// root (temperature 1) is kept for every move as a training target.
pub struct AlphaZeroPlayer<P> {
    name: String,
    config: SearchConfig,
    evaluator: BatchEvaluator<P>,
    search: Option<AlphaZeroSearch<StdRng>>,
    policies: Vec<Vec<(Action, f64)>>,
    rng: StdRng,
}

impl<P: Predictor> AlphaZeroPlayer<P> {
    pub fn new(
        name: impl Into<String>,
        predictor: P,
        config: SearchConfig,
        seed: u64,
    ) -> crate::Result<Self> {
        config.validate()?;
        let evaluator = BatchEvaluator::new(predictor, config.batch_size)?;
        Ok(Self {
            name: name.into(),
            config,
            evaluator,
            search: None,
            policies: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &BatchEvaluator<P> {
        &self.evaluator
    }

    pub fn search(&self) -> Option<&AlphaZeroSearch<StdRng>> {
        self.search.as_ref()
    }

    /// Root policies of every move so far, oldest first. Clears the history.
    pub fn take_policies(&mut self) -> Vec<Vec<(Action, f64)>> {
        std::mem::take(&mut self.policies)
    }

    fn advance_to(&mut self, state: &State) {
        let found = self
            .search
            .as_ref()
            .and_then(|search| search.find_state(state));
        match found {
            Some(id) => {
                if let Some(search) = self.search.as_mut() {
                    // Re-rooting in place would blend in root noise a second time.
                    if id != search.root() {
                        search.reroot(id);
                    }
                }
            }
            None => self.search = None,
        }
    }
}

impl<P: Predictor + Send> Player for AlphaZeroPlayer<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, state: &State) -> crate::Result<Action> {
        if state.is_end_of_game() {
            return Err(GameError::GameOver.into());
        }
        self.advance_to(state);
        let search = match self.search.take() {
            Some(search) => search,
            None => {
                let rng = StdRng::seed_from_u64(self.rng.random::<u64>());
                AlphaZeroSearch::new(*state, &self.config, rng)?
            }
        };
        let search = self.search.insert(search);

        if let Err(e) = search.run(self.config.alpha_zero_iterations, &mut self.evaluator) {
            // Visits of the dropped leaves were counted without values.
            self.search = None;
            return Err(e.into());
        }
        let root = search.root();
        let policy = search.policy(root, 1.0)?;
        let temperature = self.config.get_temperature(state.number_of_stones());
        let action = search.sample_action(root, temperature)?;
        log::debug!(
            "{}: {action} at temperature {temperature:?}, root value {:.3}, {} nodes",
            self.name,
            search.average_value(root),
            search.tree().len()
        );

        if let Some(child) = search.tree().child(root, action) {
            search.reroot(child);
        }
        self.policies.push(policy);
        Ok(action)
    }

    fn observe(&mut self, state: &State) {
        self.advance_to(state);
    }

    fn last_policy(&self) -> Option<&[(Action, f64)]> {
        self.policies.last().map(Vec::as_slice)
    }
}
