//! Finished games as JSON files, the raw material for training a predictor.

use crate::game::analyzer::winner_value;
use crate::game::{Action, Augmentation, Color, State, ACTION_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub color: Color,
}

/// One game: every move as hex, the search policy behind it when there was
/// one, and the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    /// Unix seconds at creation.
    pub timestamp: i64,
    /// e.g. "self_play", "minimax_vs_random"
    pub game_mode: String,
    pub players: Vec<PlayerRecord>,
    pub actions: Vec<String>,
    /// Move hex → probability, aligned with `actions`. Empty for moves made
    /// without a search policy.
    pub policies: Vec<BTreeMap<String, f64>>,
    pub winner: Option<Color>,
}

/// A position encoded for training with its targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: Vec<f32>,
    /// Indexed by the augmented `Action::to_int`.
    pub policy: Vec<f64>,
    /// Final result seen by the player to move.
    pub value: f64,
}

impl GameRecord {
    pub fn new(game_mode: impl Into<String>) -> Self {
        Self {
            game_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            game_mode: game_mode.into(),
            players: Vec::new(),
            actions: Vec::new(),
            policies: Vec::new(),
            winner: None,
        }
    }

    pub fn add_player(&mut self, name: impl Into<String>, color: Color) {
        self.players.push(PlayerRecord {
            name: name.into(),
            color,
        });
    }

    pub fn record_move(&mut self, action: Action, policy: Option<&[(Action, f64)]>) {
        self.actions.push(action.to_hex());
        let policy = policy
            .unwrap_or_default()
            .iter()
            .map(|(action, probability)| (action.to_hex(), *probability))
            .collect();
        self.policies.push(policy);
    }

    pub fn finalize(&mut self, final_state: &State) {
        self.winner = final_state.winner();
    }

    pub fn file_name(&self) -> String {
        let date = chrono::DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or_default()
            .format("%Y%m%d_%H%M%S");
        format!("{date}_{}.json", self.game_id)
    }

    /// Writes the record into `dir`, creating it if needed. File names sort by
    /// creation time.
    pub fn write_to_dir(&self, dir: &Path) -> crate::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, serde_json::to_string(self)?)?;
        log::debug!("saved game {} to {}", self.game_id, path.display());
        Ok(path)
    }

    pub fn read_from_file(path: &Path) -> crate::Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Replays the moves from the empty board and returns every position
    /// reached, the empty board first.
    pub fn replay(&self) -> crate::Result<Vec<State>> {
        let mut states = vec![State::empty()];
        let mut state = State::empty();
        for hex in &self.actions {
            state = state.take_action(Action::from_hex(hex)?)?;
            states.push(state);
        }
        Ok(states)
    }

    /// Every position before a move that has a policy, under each of the eight
    /// board symmetries.
    pub fn training_samples(&self) -> crate::Result<Vec<TrainingSample>> {
        let states = self.replay()?;
        let mut samples = Vec::new();
        for (state, policy) in states.iter().zip(&self.policies) {
            if policy.is_empty() {
                continue;
            }
            let value = winner_value(self.winner, state);
            for augmentation in Augmentation::iter_augmentations() {
                samples.push(TrainingSample {
                    features: state.to_features(augmentation),
                    policy: augmented_policy(policy, augmentation)?,
                    value,
                });
            }
        }
        Ok(samples)
    }
}

fn augmented_policy(
    policy: &BTreeMap<String, f64>,
    augmentation: Augmentation,
) -> crate::Result<Vec<f64>> {
    let mut dense = vec![0.0; ACTION_COUNT];
    for (hex, probability) in policy {
        let action = Action::from_hex(hex)?.augment(augmentation);
        dense[action.to_int()] = *probability;
    }
    Ok(dense)
}

/// The `n_games` most recent records in `dir`, oldest first.
pub fn load_games(dir: &Path, n_games: usize) -> crate::Result<Vec<GameRecord>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    let skip = paths.len().saturating_sub(n_games);
    paths[skip..]
        .iter()
        .map(|path| GameRecord::read_from_file(path))
        .collect()
}
