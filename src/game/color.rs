use serde::{Deserialize, Serialize};
use std::fmt;

/// Stone colour. White always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Brown,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Brown,
            Color::Brown => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Brown => write!(f, "brown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_an_involution() {
        assert_eq!(Color::White.other(), Color::Brown);
        assert_eq!(Color::Brown.other().other(), Color::Brown);
    }
}
