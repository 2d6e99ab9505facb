use crate::game::augmentation::Augmentation;
use crate::game::{GameError, ACTION_COUNT, FOUR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dropping a stone on peg `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub x: u8,
    pub y: u8,
}

impl Action {
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < FOUR && y < FOUR, "peg ({x}, {y}) is off the board");
        Self { x, y }
    }

    /// Index in the fixed 16-slot action space used by predictors.
    pub fn to_int(self) -> usize {
        (self.x * FOUR + self.y) as usize
    }

    pub fn from_int(index: usize) -> Result<Self, GameError> {
        if index >= ACTION_COUNT {
            return Err(GameError::InvalidActionIndex(index));
        }
        let four = FOUR as usize;
        Ok(Self::new((index / four) as u8, (index % four) as u8))
    }

    pub fn to_hex(self) -> String {
        format!("{:x}", self.to_int())
    }

    /// Parses the single lowercase digit written by [`Action::to_hex`].
    pub fn from_hex(hex: &str) -> Result<Self, GameError> {
        let invalid = || GameError::InvalidActionHex(hex.to_string());
        let mut chars = hex.chars();
        let (Some(digit), None) = (chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if digit.is_ascii_uppercase() {
            return Err(invalid());
        }
        let index = digit.to_digit(16).ok_or_else(invalid)?;
        Self::from_int(index as usize).map_err(|_| invalid())
    }

    /// All sixteen pegs in `to_int` order.
    pub fn iter_actions() -> impl Iterator<Item = Action> {
        (0..FOUR).flat_map(|x| (0..FOUR).map(move |y| Action::new(x, y)))
    }

    pub fn augment(self, augmentation: Augmentation) -> Self {
        let (x, y) = augmentation.apply(self.x, self.y);
        Self::new(x, y)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell of the cube; `z` is the height on the peg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Position {
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Flat cell index, `x` major and `z` minor.
    pub fn index(self) -> usize {
        let four = FOUR as usize;
        (self.x as usize * four + self.y as usize) * four + self.z as usize
    }

    pub fn from_index(index: usize) -> Self {
        let four = FOUR as usize;
        Self::new(
            (index / (four * four)) as u8,
            (index / four % four) as u8,
            (index % four) as u8,
        )
    }

    /// Symmetries only act on the horizontal plane.
    pub fn augment(self, augmentation: Augmentation) -> Self {
        let (x, y) = augmentation.apply(self.x, self.y);
        Self::new(x, y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::augmentation::Rotation;
    use assert_matches::assert_matches;

    #[test]
    fn test_action_to_int() {
        let action = Action::new(2, 3);
        assert_eq!(action, Action::from_int(action.to_int()).unwrap());
    }

    #[test]
    fn test_action_hex() {
        let action = Action::new(3, 2);
        assert_eq!(action.to_hex(), "e");
        assert_eq!(Action::from_hex("e").unwrap(), action);
        assert_matches!(Action::from_hex("g"), Err(GameError::InvalidActionHex(_)));
        assert_matches!(Action::from_hex("10"), Err(GameError::InvalidActionHex(_)));
    }

    #[test]
    fn test_action_hex_is_one_lowercase_digit() {
        for hex in ["0e", "+e", "E", "", " e", "e "] {
            assert_matches!(Action::from_hex(hex), Err(GameError::InvalidActionHex(_)), "{hex:?}");
        }
        for action in Action::iter_actions() {
            assert_eq!(Action::from_hex(&action.to_hex()).unwrap(), action);
        }
    }

    #[test]
    fn test_iter_actions_covers_the_grid_in_order() {
        let indices: Vec<usize> = Action::iter_actions().map(Action::to_int).collect();
        assert_eq!(indices, (0..ACTION_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_rotating_four_quarters_is_same() {
        let old_action = Action::new(1, 3);
        let mut action = old_action;
        for _ in 0..4 {
            action = action.augment(Augmentation::new(Rotation::Quarter, false, false));
        }
        assert_eq!(old_action, action);
    }

    #[test]
    fn test_flipping_twice_is_same() {
        let flip = Augmentation::new(Rotation::No, true, false);
        let action = Action::new(0, 0);
        assert_eq!(action.augment(flip).augment(flip), action);
    }

    #[test]
    fn test_position_rotation() {
        let position = Position::new(0, 3, 2).augment(Augmentation::new(Rotation::Half, false, false));
        assert_eq!(Position::new(3, 0, 2), position);
    }

    #[test]
    fn test_position_index_round_trip() {
        for index in 0..64 {
            assert_eq!(Position::from_index(index).index(), index);
        }
    }
}
