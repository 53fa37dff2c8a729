//! Granny Escape headless runner
//!
//! Plays the house with the autopilot at a fixed timestep and reports the
//! outcome. Useful for soak-testing the simulation and reproducing seeds.

use std::path::PathBuf;

use clap::Parser;

use granny_escape::sim::{GameEvent, GameState, GameStatus, TickInput, tick};
use granny_escape::{
    Difficulty, FileScoreStore, MemoryScoreStore, ScoreStore, Settings, StoreError, logging,
};

/// Headless Granny Escape - let the autopilot try to get out of the house
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to simulate (60 per second)
    #[arg(long, default_value_t = 60 * 60 * 20)]
    ticks: u64,

    /// Override the difficulty from the settings file (easy, normal, extreme)
    #[arg(long)]
    difficulty: Option<String>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// High score JSON file (kept in memory when omitted)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<(), StoreError> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(name) = &args.difficulty {
        settings.difficulty = Difficulty::from_str(name);
    }

    let mut store: Box<dyn ScoreStore> = match &args.score_file {
        Some(path) => Box::new(FileScoreStore::new(path)),
        None => Box::new(MemoryScoreStore::default()),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Seed {} on {} for up to {} ticks",
        seed,
        settings.difficulty.as_str(),
        args.ticks
    );

    let mut state = GameState::new(seed, settings);
    state.high_score = store.load();
    state.start_run();

    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..args.ticks {
        tick(&mut state, &mut input);
        for event in &state.events {
            if let GameEvent::NewHighScore { score } = event {
                store.submit(*score)?;
            }
        }
        if matches!(state.status, GameStatus::Caught | GameStatus::Escaped) {
            break;
        }
    }

    log::info!(
        "Finished {:?} on day {} at {} with {} points after {} ticks",
        state.status,
        state.day,
        state.game_time_str(),
        state.score,
        state.time_ticks
    );

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    }
    Ok(())
}
