use crate::game::action::{Action, Position};
use crate::game::augmentation::Augmentation;
use crate::game::color::Color;
use crate::game::lines::lines_through;
use crate::game::{GameError, ACTION_COUNT, CELL_COUNT, FOUR};
use std::fmt;

/// Channels per cell in [`State::to_features`]: own stones, opponent stones.
pub const FEATURE_CHANNELS: usize = 2;

/// Immutable game position.
///
/// Two states are equal when they hold the same stones; side to move and
/// winner follow from the stones, so derived equality is board equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    stones: [Option<Color>; CELL_COUNT],
    heights: [u8; ACTION_COUNT],
    next_color: Color,
    number_of_stones: u8,
    winner: Option<Color>,
}

impl State {
    pub fn empty() -> Self {
        Self {
            stones: [None; CELL_COUNT],
            heights: [0; ACTION_COUNT],
            next_color: Color::White,
            number_of_stones: 0,
            winner: None,
        }
    }

    pub fn next_color(&self) -> Color {
        self.next_color
    }

    /// Grows by exactly one per move, which orders states along any line of play.
    pub fn number_of_stones(&self) -> usize {
        self.number_of_stones as usize
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_full(&self) -> bool {
        self.number_of_stones() == CELL_COUNT
    }

    pub fn is_end_of_game(&self) -> bool {
        self.has_winner() || self.is_full()
    }

    pub fn stone(&self, position: Position) -> Option<Color> {
        self.stones[position.index()]
    }

    pub fn stones(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.stones
            .iter()
            .enumerate()
            .filter_map(|(index, stone)| stone.map(|color| (Position::from_index(index), color)))
    }

    /// Stones on the peg of `action`, which must be on the board.
    pub fn height(&self, action: Action) -> u8 {
        self.heights[action.to_int()]
    }

    /// False for pegs off the board, full pegs and finished games.
    pub fn is_allowed(&self, action: Action) -> bool {
        action.x < FOUR && action.y < FOUR && !self.is_end_of_game() && self.height(action) < FOUR
    }

    /// Legal moves in `Action::to_int` order; empty iff the game is over.
    pub fn allowed_actions(&self) -> Vec<Action> {
        Action::iter_actions()
            .filter(|action| self.is_allowed(*action))
            .collect()
    }

    pub fn take_action(&self, action: Action) -> Result<State, GameError> {
        if self.is_end_of_game() {
            return Err(GameError::GameOver);
        }
        if !self.is_allowed(action) {
            return Err(GameError::IllegalAction(action));
        }
        Ok(self.place(action))
    }

    /// Every legal move paired with the state it leads to.
    pub fn successors(&self) -> impl Iterator<Item = (Action, State)> + '_ {
        self.allowed_actions()
            .into_iter()
            .map(move |action| (action, self.place(action)))
    }

    /// Applies a move already known to be legal.
    pub(crate) fn place(&self, action: Action) -> State {
        debug_assert!(self.is_allowed(action), "illegal move {action}");
        let mover = self.next_color;
        let position = Position::new(action.x, action.y, self.height(action));
        let cell = position.index();

        let mut next = *self;
        next.stones[cell] = Some(mover);
        next.heights[action.to_int()] += 1;
        next.number_of_stones += 1;
        next.next_color = mover.other();
        if lines_through(cell)
            .iter()
            .any(|line| line.iter().all(|&c| next.stones[c] == Some(mover)))
        {
            next.winner = Some(mover);
        }
        next
    }

    /// Flat `[x][y][z][channel]` encoding seen from the player to move:
    /// channel 0 holds their stones, channel 1 the opponent's.
    pub fn to_features(&self, augmentation: Augmentation) -> Vec<f32> {
        let mut features = vec![0.0f32; CELL_COUNT * FEATURE_CHANNELS];
        for (position, color) in self.stones() {
            let channel = if color == self.next_color { 0 } else { 1 };
            let cell = position.augment(augmentation).index();
            features[cell * FEATURE_CHANNELS + channel] = 1.0;
        }
        features
    }

    /// The symmetry-equivalent encodings of this position.
    pub fn augmentations(&self) -> Vec<(Augmentation, Vec<f32>)> {
        Augmentation::iter_augmentations()
            .map(|augmentation| (augmentation, self.to_features(augmentation)))
            .collect()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in (0..FOUR).rev() {
            writeln!(f, "z={z}")?;
            for y in (0..FOUR).rev() {
                let row: String = (0..FOUR)
                    .map(|x| match self.stone(Position::new(x, y, z)) {
                        Some(Color::White) => 'W',
                        Some(Color::Brown) => 'B',
                        None => '.',
                    })
                    .collect();
                writeln!(f, "  {row}")?;
            }
        }
        write!(f, "next: {}", self.next_color)
    }
}
