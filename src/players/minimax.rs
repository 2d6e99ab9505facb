use crate::game::{Action, GameError, State};
use crate::mcts::{MinimaxSearch, SearchConfig};
use crate::players::Player;

/// Builds a fresh minimax tree of fixed depth for every move.
pub struct MiniMaxPlayer {
    name: String,
    depth: usize,
    eager_propagation: bool,
}

impl MiniMaxPlayer {
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth: depth.max(1),
            eager_propagation: true,
        }
    }

    pub fn with_config(name: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            eager_propagation: config.eager_propagation,
            ..Self::new(name, config.minimax_depth)
        }
    }
}

impl Player for MiniMaxPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_action(&mut self, state: &State) -> crate::Result<Action> {
        let mut search = MinimaxSearch::new(*state, state.next_color());
        search.expand_to_depth(self.depth, self.eager_propagation);
        log::debug!(
            "{}: {} nodes, root value {}",
            self.name,
            search.tree().len(),
            search.value(search.root())
        );
        Ok(search.best_action().ok_or(GameError::GameOver)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(u8, u8)]) -> State {
        moves.iter().fold(State::empty(), |state, &(x, y)| {
            state.take_action(Action::new(x, y)).unwrap()
        })
    }

    #[test]
    fn test_blocks_a_vertical_threat() {
        let state = play(&[(0, 0), (1, 0), (2, 2), (1, 0), (3, 1), (1, 0)]);
        let mut player = MiniMaxPlayer::new("minimax", 2);
        assert_eq!(player.next_action(&state).unwrap(), Action::new(1, 0));
    }

    #[test]
    fn test_deferred_refresh_plays_the_same_move() {
        let state = play(&[(1, 1), (2, 2), (1, 2)]);
        let config = SearchConfig {
            eager_propagation: false,
            ..SearchConfig::default()
        };
        let mut deferred = MiniMaxPlayer::with_config("deferred", &config);
        let mut eager = MiniMaxPlayer::new("eager", 2);
        assert_eq!(
            deferred.next_action(&state).unwrap(),
            eager.next_action(&state).unwrap()
        );
    }
}
