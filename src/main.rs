//! Beam Me Up headless runner
//!
//! Plays an attract-mode session with the autopilot at a fixed 60 Hz step,
//! then prints the run record and optionally files it on a local leaderboard.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use beam_me_up::consts::{ARENA_HEIGHT, ARENA_WIDTH, FIXED_DT};
use beam_me_up::sim::{SoundEvent, autopilot};
use beam_me_up::{Engine, EngineHooks, HighScores, RunRecord, Tuning};

#[derive(Parser)]
#[command(name = "beam-me-up")]
#[command(about = "Run a headless Beam Me Up session driven by the autopilot")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,
    /// Balance overrides as JSON
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Leaderboard file to record the run on
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Name recorded with the score
    #[arg(long, default_value = "Autopilot")]
    name: String,
}

/// Logs milestones as they happen
#[derive(Default)]
struct LogHooks {
    sounds: u64,
    game_over: Option<RunRecord>,
}

impl EngineHooks for LogHooks {
    fn on_game_over(&mut self, record: &RunRecord) {
        log::info!("Game over at level {} with {} points", record.level, record.score);
        self.game_over = Some(record.clone());
    }

    fn on_level_changed(&mut self, level: u32) {
        log::info!("Now on level {level}");
    }

    fn play_sound(&mut self, sound: SoundEvent) {
        self.sounds += 1;
        log::trace!("sound: {}", sound.as_str());
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Beam Me Up (headless) starting with seed {seed}");

    let mut engine = Engine::with_tuning(ARENA_WIDTH, ARENA_HEIGHT, seed, tuning, LogHooks::default());
    let max_ticks = (args.seconds.max(0.0) / FIXED_DT).ceil() as u64;
    let mut ticks = 0;
    while ticks < max_ticks && !engine.is_game_over() {
        let mut input = autopilot::drive(engine.state());
        engine.update(FIXED_DT, &mut input);
        ticks += 1;
    }

    let record = engine
        .hooks_mut()
        .game_over
        .take()
        .unwrap_or_else(|| engine.record())
        .with_name(args.name.as_str());
    log::info!(
        "Session finished after {ticks} ticks ({} sound cues)",
        engine.hooks().sounds
    );

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize run record: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = args.scores {
        let mut scores = HighScores::load(&path);
        match scores.add_run(&record) {
            Some(rank) => log::info!("Leaderboard rank #{rank}"),
            None => log::info!("Score did not make the leaderboard"),
        }
        if let Err(e) = scores.save(&path) {
            log::error!("Failed to save high scores to {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
