use crate::game::analyzer::player_value;
use crate::game::{Action, GameError, State};
use crate::players::Player;

/// Looks one move ahead and plays the move with the best heuristic value.
pub struct GreedyPlayer {
    name: String,
}

impl GreedyPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, state: &State) -> crate::Result<Action> {
        let color = state.next_color();
        let mut best: Option<(Action, f64)> = None;
        for (action, successor) in state.successors() {
            let value = player_value(&successor, color);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
        }
        Ok(best.map(|(action, _)| action).ok_or(GameError::GameOver)?)
    }
}
