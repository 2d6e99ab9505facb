//! Hand-written position evaluation used by the greedy and minimax players.

use crate::game::action::Position;
use crate::game::color::Color;
use crate::game::lines::{all_lines, Line};
use crate::game::state::State;

/// Score of a won position. Larger than any sum of open-line scores.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Heuristic value of `state` for `color`. Total and side-effect free.
///
/// Every line still open to one side scores `4^k` for its `k` stones, added
/// for `color` and subtracted for the opponent. Decided games score
/// `±WIN_SCORE` and a full board without winner scores zero.
pub fn player_value(state: &State, color: Color) -> f64 {
    match state.winner() {
        Some(winner) if winner == color => return WIN_SCORE,
        Some(_) => return -WIN_SCORE,
        None if state.is_full() => return 0.0,
        None => {}
    }

    let opponent = color.other();
    let stones = |line: &Line, who: Color| {
        line.iter()
            .filter(|&&cell| state.stone(Position::from_index(cell)) == Some(who))
            .count() as i32
    };

    all_lines()
        .iter()
        .map(|line| match (stones(line, color), stones(line, opponent)) {
            (own, 0) if own > 0 => 4f64.powi(own),
            (0, theirs) if theirs > 0 => -4f64.powi(theirs),
            _ => 0.0,
        })
        .sum()
}

/// Game outcome seen by the player to move in `state`: +1 won, -1 lost, 0 otherwise.
pub fn winner_value(winner: Option<Color>, state: &State) -> f64 {
    match winner {
        Some(color) if color == state.next_color() => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}
