//! The 76 winning lines of the 4×4×4 cube.

use crate::game::action::Position;
use crate::game::{CELL_COUNT, FOUR};
use std::sync::OnceLock;

/// Four cell indices, see [`Position::index`].
pub type Line = [usize; 4];

fn line(cell: impl Fn(u8) -> (u8, u8, u8)) -> Line {
    std::array::from_fn(|t| {
        let (x, y, z) = cell(t as u8);
        Position::new(x, y, z).index()
    })
}

/// Lines parallel to one of the three axes.
pub fn lines_on_one_axis() -> Vec<Line> {
    let mut lines = Vec::with_capacity(48);
    for a in 0..FOUR {
        for b in 0..FOUR {
            lines.push(line(|t| (t, a, b)));
            lines.push(line(|t| (a, t, b)));
            lines.push(line(|t| (a, b, t)));
        }
    }
    lines
}

/// Diagonals lying in a plane orthogonal to one axis.
pub fn lines_on_one_diagonal() -> Vec<Line> {
    let last = FOUR - 1;
    let mut lines = Vec::with_capacity(24);
    for c in 0..FOUR {
        lines.push(line(|t| (c, t, t)));
        lines.push(line(|t| (c, t, last - t)));
        lines.push(line(|t| (t, c, t)));
        lines.push(line(|t| (t, c, last - t)));
        lines.push(line(|t| (t, t, c)));
        lines.push(line(|t| (t, last - t, c)));
    }
    lines
}

/// The space diagonals joining opposite corners of the cube.
pub fn lines_on_two_diagonals() -> Vec<Line> {
    let last = FOUR - 1;
    vec![
        line(|t| (t, t, t)),
        line(|t| (t, t, last - t)),
        line(|t| (t, last - t, t)),
        line(|t| (t, last - t, last - t)),
    ]
}

pub fn all_lines() -> &'static [Line] {
    static LINES: OnceLock<Vec<Line>> = OnceLock::new();
    LINES.get_or_init(|| {
        let mut lines = lines_on_one_axis();
        lines.extend(lines_on_one_diagonal());
        lines.extend(lines_on_two_diagonals());
        lines
    })
}

/// Lines passing through one cell; winner detection only inspects these.
pub fn lines_through(cell: usize) -> &'static [Line] {
    static BY_CELL: OnceLock<Vec<Vec<Line>>> = OnceLock::new();
    let by_cell = BY_CELL.get_or_init(|| {
        let mut by_cell = vec![Vec::new(); CELL_COUNT];
        for line in all_lines() {
            for &c in line {
                by_cell[c].push(*line);
            }
        }
        by_cell
    });
    &by_cell[cell]
}
