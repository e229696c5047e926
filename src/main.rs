//! Headless Tetris simulator (default binary).
//!
//! Drives the engine frame by frame with a seeded random player and prints the
//! final snapshot as JSON on stdout. Logs go to stderr (`RUST_LOG` overrides
//! the level). Nothing is rendered and no input device is read.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};
use tracing_subscriber::{fmt, EnvFilter};

use arcade_tetris::core::{EngineConfig, GameState};
use arcade_tetris::types::{GameAction, GameEvent, FRAME_MS};

/// tetris-sim - run the Tetris engine without a screen
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Piece sequence seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 10_000)]
    frames: u64,

    /// Simulated frame duration in milliseconds
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: u32,

    /// Sleep between frames and feed measured wall-clock time to the engine
    #[arg(long)]
    realtime: bool,

    /// Probability that the player acts on a given frame
    #[arg(long, default_value_t = 0.2)]
    action_rate: f64,

    /// Start a new game after game over instead of stopping
    #[arg(long)]
    restart: bool,

    /// Path to a JSON engine config; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Commands the random player picks from
const PLAYER_ACTIONS: [GameAction; 5] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::Rotate,
    GameAction::RotateCcw,
    GameAction::SoftDrop,
];

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.debug { "debug" } else { "info" })
    });
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(&args)?;
    let mut game = GameState::new(config).context("failed to start game")?;
    info!(
        seed = game.seed(),
        width = game.board().width(),
        height = game.board().height(),
        "simulation started"
    );

    let games = run(&mut game, &args)?;

    let snapshot = game.snapshot();
    info!(
        games,
        score = snapshot.score,
        level = snapshot.level,
        lines = snapshot.lines,
        status = ?snapshot.status,
        "simulation finished"
    );
    let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<EngineConfig>(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("invalid engine config")?;
    Ok(config)
}

/// Run the frame loop; returns the number of games played
fn run(game: &mut GameState, args: &Args) -> Result<u32> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.action_rate),
        "action rate must be within 0.0..=1.0"
    );

    let mut player = StdRng::seed_from_u64(game.seed().wrapping_add(1));
    let frame = Duration::from_millis(args.frame_ms as u64);
    let mut clock = FrameClock::new(Instant::now());
    let mut games = 1;

    for _ in 0..args.frames {
        let elapsed_ms = if args.realtime {
            let deadline = clock.next_deadline(frame);
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            clock.elapsed_ms(Instant::now())
        } else {
            args.frame_ms
        };

        if player.random_bool(args.action_rate) {
            let action = PLAYER_ACTIONS[player.random_range(0..PLAYER_ACTIONS.len())];
            let applied = game.apply_action(action);
            trace!(action = action.as_str(), applied, "player");
        }
        game.tick(elapsed_ms);

        for event in game.drain_events() {
            match event {
                GameEvent::LinesCleared { count, points } => debug!(count, points, "cleared"),
                GameEvent::GameOver { score } => debug!(score, "topped out"),
                _ => {}
            }
        }

        if game.is_game_over() {
            if !args.restart {
                break;
            }
            game.apply_action(GameAction::Reset);
            games += 1;
        }
    }

    Ok(games)
}

/// Wall-clock frame timing measured against one starting instant
///
/// Each call hands out the whole milliseconds not yet fed to the engine, so
/// sub-millisecond remainders carry over and the running total tracks real time.
struct FrameClock {
    start: Instant,
    frames: u32,
    fed_ms: u64,
}

impl FrameClock {
    fn new(start: Instant) -> Self {
        Self {
            start,
            frames: 0,
            fed_ms: 0,
        }
    }

    /// Instant at which the next frame is due
    fn next_deadline(&self, frame: Duration) -> Instant {
        self.start + frame * self.frames.saturating_add(1)
    }

    /// Milliseconds elapsed since the previous frame, as of `now`
    fn elapsed_ms(&mut self, now: Instant) -> u32 {
        self.frames = self.frames.saturating_add(1);
        let total = u64::try_from(now.duration_since(self.start).as_millis()).unwrap_or(u64::MAX);
        let delta = total.saturating_sub(self.fed_ms);
        self.fed_ms = total;
        u32::try_from(delta).unwrap_or(u32::MAX)
    }
}
