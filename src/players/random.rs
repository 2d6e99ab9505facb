use crate::game::{Action, GameError, State};
use crate::players::Player;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Picks uniformly among the legal moves.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, state: &State) -> crate::Result<Action> {
        if state.is_end_of_game() {
            return Err(GameError::GameOver.into());
        }
        let actions = state.allowed_actions();
        Ok(actions[self.rng.random_range(0..actions.len())])
    }
}
