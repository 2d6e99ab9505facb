use clap::{Parser, Subcommand};
use connect_four_3d::game::{Color, TwoPlayerGame};
use connect_four_3d::logging::setup_logging;
use connect_four_3d::mcts::{HeuristicPredictor, SearchConfig};
use connect_four_3d::players::{build_player, PlayerKind};
use connect_four_3d::recording::{record_game, self_play_game};
use rayon::prelude::*;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "connect_four_3d", version, about = "4x4x4 connect four with tree-search players")]
struct Cli {
    /// Log spec used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write rotated log files here instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// JSON search configuration; missing fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Search budget per move for Monte Carlo and AlphaZero players
    #[arg(long, global = true)]
    iterations: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match between two kinds of players
    Play {
        #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
        white: PlayerKind,

        #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
        brown: PlayerKind,

        #[arg(short = 'g', long, default_value_t = 10)]
        games: usize,

        /// Minimax depth
        #[arg(long)]
        depth: Option<usize>,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Save every game record in this directory
        #[arg(long)]
        record_dir: Option<PathBuf>,
    },

    /// Generate AlphaZero self-play games guided by the line heuristic
    SelfPlay {
        #[arg(short = 'g', long, default_value_t = 10)]
        games: usize,

        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn load_config(cli: &Cli, self_play: bool) -> connect_four_3d::Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None if self_play => SearchConfig::self_play(),
        None => SearchConfig::default(),
    };
    if let Some(iterations) = cli.iterations {
        config.monte_carlo_iterations = iterations;
        config.alpha_zero_iterations = iterations;
    }
    if let Command::Play { depth: Some(depth), .. } = cli.command {
        config.minimax_depth = depth;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level, cli.log_dir.as_deref())?;
    log::info!("{} {}", connect_four_3d::NAME, connect_four_3d::VERSION);

    match &cli.command {
        Command::Play {
            white,
            brown,
            games,
            seed,
            record_dir,
            ..
        } => {
            let config = load_config(&cli, false)?;
            log::info!("🎮 {white} vs {brown}, {games} games, {}", config.to_config_string());
            let game_mode = format!("{white}_vs_{brown}");

            let winners = (0..*games)
                .into_par_iter()
                .map(|i| -> connect_four_3d::Result<Option<Color>> {
                    let game_seed = seed.wrapping_add(2 * i as u64);
                    let mut game = TwoPlayerGame::new(
                        build_player(*white, format!("{white} (white)"), &config, game_seed)?,
                        build_player(*brown, format!("{brown} (brown)"), &config, game_seed.wrapping_add(1))?,
                    );
                    let record = record_game(&mut game, &game_mode)?;
                    if let Some(dir) = record_dir {
                        record.write_to_dir(dir)?;
                    }
                    log::info!("game {i}: winner {:?} after {} moves", record.winner, record.actions.len());
                    Ok(record.winner)
                })
                .collect::<connect_four_3d::Result<Vec<_>>>()?;

            let white_wins = winners.iter().filter(|w| **w == Some(Color::White)).count();
            let brown_wins = winners.iter().filter(|w| **w == Some(Color::Brown)).count();
            log::info!(
                "🏁 {white} (white) {white_wins} - {brown_wins} {brown} (brown), {} draws",
                winners.len() - white_wins - brown_wins
            );
        }
        Command::SelfPlay {
            games,
            data_dir,
            seed,
        } => {
            let config = load_config(&cli, true)?;
            log::info!("🔁 self-play, {games} games into {}", data_dir.display());

            let paths = (0..*games)
                .into_par_iter()
                .map(|i| {
                    let record =
                        self_play_game(HeuristicPredictor::default(), &config, seed.wrapping_add(i as u64))?;
                    record.write_to_dir(data_dir)
                })
                .collect::<connect_four_3d::Result<Vec<_>>>()?;
            log::info!("✅ saved {} games", paths.len());
        }
    }
    Ok(())
}
