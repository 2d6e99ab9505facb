//! Symmetries of the 4×4 peg grid.
//!
//! Gravity fixes the vertical axis, so the board only has the eight symmetries
//! of the square: four rotations, each optionally mirrored.

use crate::game::FOUR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    No,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::No,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    fn quarter_turns(self) -> u8 {
        match self {
            Rotation::No => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }
}

/// A rotation followed by optional mirroring along each horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Augmentation {
    pub rotation: Rotation,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Augmentation {
    pub const IDENTITY: Augmentation = Augmentation {
        rotation: Rotation::No,
        flip_x: false,
        flip_y: false,
    };

    pub fn new(rotation: Rotation, flip_x: bool, flip_y: bool) -> Self {
        Self {
            rotation,
            flip_x,
            flip_y,
        }
    }

    /// The eight distinct symmetries. Mirroring along `y` is a rotation of
    /// mirroring along `x`, so only `flip_x` is enumerated.
    pub fn iter_augmentations() -> impl Iterator<Item = Augmentation> {
        Rotation::ALL.into_iter().flat_map(|rotation| {
            [false, true]
                .into_iter()
                .map(move |flip_x| Augmentation::new(rotation, flip_x, false))
        })
    }

    /// Maps a peg coordinate. A quarter turn sends `(x, y)` to `(3 - y, x)`;
    /// flips are applied after the rotation.
    pub fn apply(&self, x: u8, y: u8) -> (u8, u8) {
        let last = FOUR - 1;
        let (mut x, mut y) = (x, y);
        for _ in 0..self.rotation.quarter_turns() {
            (x, y) = (last - y, x);
        }
        if self.flip_x {
            x = last - x;
        }
        if self.flip_y {
            y = last - y;
        }
        (x, y)
    }
}

impl Default for Augmentation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
