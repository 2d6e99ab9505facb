use crate::game::{Color, State, TwoPlayerGame};
use crate::mcts::{Predictor, SearchConfig};
use crate::players::{AlphaZeroPlayer, Player};
use crate::recording::GameRecord;

/// Plays `game` to the end and records every move with the policy of the
/// player that made it.
pub fn record_game(game: &mut TwoPlayerGame, game_mode: &str) -> crate::Result<GameRecord> {
    let mut record = GameRecord::new(game_mode);
    record.add_player(game.player(Color::White).name(), Color::White);
    record.add_player(game.player(Color::Brown).name(), Color::Brown);

    while !game.current_state().is_end_of_game() {
        let mover = game.current_state().next_color();
        let action = game.turn()?;
        record.record_move(action, game.player(mover).last_policy());
    }
    record.finalize(game.current_state());
    Ok(record)
}

/// One AlphaZero player moves for both sides, sharing its tree across the
/// whole game.
pub fn self_play_game<P: Predictor + Send>(
    predictor: P,
    config: &SearchConfig,
    seed: u64,
) -> crate::Result<GameRecord> {
    let mut player = AlphaZeroPlayer::new("self-play", predictor, config.clone(), seed)?;
    let mut record = GameRecord::new("self_play");
    record.add_player(player.name(), Color::White);
    record.add_player(player.name(), Color::Brown);

    let mut state = State::empty();
    while !state.is_end_of_game() {
        let action = player.next_action(&state)?;
        record.record_move(action, player.last_policy());
        state = state.take_action(action)?;
    }
    record.finalize(&state);
    log::info!(
        "self-play game {} finished after {} moves, winner {:?}",
        record.game_id,
        record.actions.len(),
        record.winner
    );
    Ok(record)
}
