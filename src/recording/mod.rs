//! Game records for training data collection.
//!
//! - `game_record`: the JSON record of one game and the samples derived from it
//! - `self_play`: playing games while recording them

pub mod game_record;
pub mod self_play;

pub use game_record::{load_games, GameRecord, PlayerRecord, TrainingSample};
pub use self_play::{record_game, self_play_game};
