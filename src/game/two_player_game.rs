use crate::game::{Action, Color, GameError, State};
use crate::players::Player;

/// Plays two players against each other. The first player moves the white stones.
pub struct TwoPlayerGame {
    current_state: State,
    players: [Box<dyn Player>; 2],
    actions: Vec<Action>,
}

impl TwoPlayerGame {
    pub fn new(white: Box<dyn Player>, brown: Box<dyn Player>) -> Self {
        Self::from_state(State::empty(), white, brown)
    }

    pub fn from_state(state: State, white: Box<dyn Player>, brown: Box<dyn Player>) -> Self {
        Self {
            current_state: state,
            players: [white, brown],
            actions: Vec::new(),
        }
    }

    pub fn current_state(&self) -> &State {
        &self.current_state
    }

    /// Moves played through this game, in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn player(&self, color: Color) -> &dyn Player {
        self.players[Self::seat(color)].as_ref()
    }

    fn seat(color: Color) -> usize {
        match color {
            Color::White => 0,
            Color::Brown => 1,
        }
    }

    /// Asks the player to move for an action, plays it and shows the new
    /// position to both players.
    pub fn turn(&mut self) -> crate::Result<Action> {
        if self.current_state.is_end_of_game() {
            return Err(GameError::GameOver.into());
        }
        let color = self.current_state.next_color();
        let player = &mut self.players[Self::seat(color)];
        let action = player.next_action(&self.current_state)?;
        self.current_state = self.current_state.take_action(action)?;
        log::debug!("{} ({color}) plays {action}", player.name());

        for player in &mut self.players {
            player.observe(&self.current_state);
        }
        self.actions.push(action);
        Ok(action)
    }

    /// Plays until somebody wins or the board is full.
    pub fn play(&mut self) -> crate::Result<&State> {
        while !self.current_state.is_end_of_game() {
            self.turn()?;
        }
        log::debug!(
            "game over after {} moves, winner {:?}",
            self.actions.len(),
            self.current_state.winner()
        );
        Ok(&self.current_state)
    }

    pub fn into_players(self) -> [Box<dyn Player>; 2] {
        self.players
    }
}
