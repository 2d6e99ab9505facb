use crate::game::{Action, GameError, State};
use crate::mcts::{MonteCarloSearch, SearchConfig};
use crate::players::Player;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Runs a fixed number of Monte Carlo searches per move and keeps the explored
/// subtree for the following moves.
pub struct MonteCarloPlayer {
    name: String,
    iterations: usize,
    exploration: f64,
    search: Option<MonteCarloSearch<StdRng>>,
    rng: StdRng,
}

impl MonteCarloPlayer {
    pub fn new(name: impl Into<String>, iterations: usize, exploration: f64, seed: u64) -> Self {
        Self {
            name: name.into(),
            iterations: iterations.max(1),
            exploration,
            search: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_config(name: impl Into<String>, config: &SearchConfig, seed: u64) -> Self {
        Self::new(name, config.monte_carlo_iterations, config.exploration, seed)
    }

    /// Root statistics of the last search, if any.
    pub fn search(&self) -> Option<&MonteCarloSearch<StdRng>> {
        self.search.as_ref()
    }

    /// Moves the root to `state` when it is in the tree, otherwise forgets the tree.
    fn advance_to(&mut self, state: &State) {
        let found = self
            .search
            .as_ref()
            .and_then(|search| search.find_state(state));
        match found {
            Some(id) => {
                if let Some(search) = self.search.as_mut() {
                    if id != search.root() {
                        search.reroot(id);
                    }
                }
            }
            None => self.search = None,
        }
    }
}

impl Player for MonteCarloPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, state: &State) -> crate::Result<Action> {
        if state.is_end_of_game() {
            return Err(GameError::GameOver.into());
        }
        self.advance_to(state);
        let seed = self.rng.random::<u64>();
        let exploration = self.exploration;
        let search = self
            .search
            .get_or_insert_with(|| MonteCarloSearch::new(*state, exploration, StdRng::seed_from_u64(seed)));

        let reused = search.stats(search.root()).visit_count;
        for _ in 0..self.iterations {
            search.search();
        }
        log::debug!(
            "{}: {} searches on top of {} reused, {} nodes",
            self.name,
            self.iterations,
            reused,
            search.tree().len()
        );
        Ok(search.best_action().ok_or(GameError::GameOver)?)
    }

    fn observe(&mut self, state: &State) {
        self.advance_to(state);
    }
}
