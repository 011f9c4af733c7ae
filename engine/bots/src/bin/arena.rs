//! Arena - plays Connect4 bots against each other
//!
//! Bots and the number of games come from config.toml (`[arena]`) with
//! `QUADRANT_*` environment overrides; CLI arguments take highest priority.
//! The two bots swap colours every game so neither always opens.

use anyhow::{anyhow, Result};
use bots::{build_bot, play_game, BotKind, Tally};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_connect4::Piece;
use tracing::info;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Quadrant Arena - Connect4 bot-vs-bot matches")]
struct Args {
    /// First bot (plays Red in even-numbered games)
    #[arg(long)]
    first: Option<String>,

    /// Second bot (plays Yellow in even-numbered games)
    #[arg(long)]
    second: Option<String>,

    /// Number of games to play
    #[arg(long)]
    games: Option<u32>,

    /// Base RNG seed; game i uses seed + i
    #[arg(long, env = "ARENA_SEED")]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config: CentralConfig = load_config();

    let log_level = args
        .log_level
        .unwrap_or_else(|| config.common.log_level.clone());
    if log_level.parse::<LevelFilter>().is_err() {
        return Err(anyhow!(
            "invalid log level '{}', expected one of trace, debug, info, warn, error",
            log_level
        ));
    }
    init_tracing(&log_level)?;

    let first: BotKind = args.first.as_deref().unwrap_or(&config.arena.red).parse()?;
    let second: BotKind = args
        .second
        .as_deref()
        .unwrap_or(&config.arena.yellow)
        .parse()?;
    let games = args.games.unwrap_or(config.arena.games);
    let base_seed = args.seed.or(config.common.seed);

    info!(%first, %second, games, seed = ?base_seed, "Starting arena");

    let mut tally = Tally::default();
    for game in 0..games {
        config.common.seed = base_seed.map(|s| s.wrapping_add(u64::from(game)));

        let (first_piece, red_kind, yellow_kind) = if game % 2 == 0 {
            (Piece::Red, first, second)
        } else {
            (Piece::Yellow, second, first)
        };
        let mut red = build_bot(red_kind, Piece::Red, &config)?;
        let mut yellow = build_bot(yellow_kind, Piece::Yellow, &config)?;

        let record = play_game(red.as_mut(), yellow.as_mut())?;
        tally.record(first_piece, record.winner);

        let winner = match record.winner {
            Some(Piece::Red) => red.name(),
            Some(Piece::Yellow) => yellow.name(),
            None => "draw",
        };
        info!(
            game = game + 1,
            red = red.name(),
            yellow = yellow.name(),
            winner,
            plies = record.moves.len(),
            "Game finished"
        );
        println!("{}", record.board);
    }

    tally.log_summary(first.as_str(), second.as_str());
    println!(
        "{} {} - {} {} ({} draws)",
        first, tally.first_wins, tally.second_wins, second, tally.draws
    );

    Ok(())
}
