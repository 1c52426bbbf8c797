//! walkabout — headless walk-through of a rust_hunt treasure hunt.
//!
//! Plays one session end to end without a camera or a browser:
//!
//! - By default a simulated pedestrian starts at `--lat/--lon`, walks to the
//!   nearest uncollected treasure at `--speed` m/s and taps it once within
//!   reach.  Each step pushes one fix onto the session's location stream.
//! - With `--track FILE` a recorded GPS track (see `hunt_session::track`) is
//!   replayed instead, and the walker taps whatever comes within reach.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` to see every
//! projection pass.

mod walker;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hunt_ar::{Placement, SceneGraph};
use hunt_core::{Coordinate, HuntConfig, LocationError, Millis, TreasureId};
use hunt_game::Treasure;
use hunt_session::{
    Fix, HuntObserver, HuntSession, ScriptedSource, SessionBuilder, TextUi, TrackSource,
};

use walker::Walker;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Walk through an AR treasure hunt without a device")]
struct Args {
    /// JSON file with a HuntConfig (missing fields use defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a recorded GPS track CSV instead of simulating a walk.
    #[arg(long)]
    track: Option<PathBuf>,

    /// Lay treasures out on a ring around the camera.
    #[arg(long)]
    debug: bool,

    /// RNG seed for the treasure layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting latitude for the simulated walk.
    #[arg(long, default_value_t = 51.500_729, allow_hyphen_values = true)]
    lat: f64,

    /// Starting longitude for the simulated walk.
    #[arg(long, default_value_t = -0.124_625, allow_hyphen_values = true)]
    lon: f64,

    /// Walking speed, metres per second.
    #[arg(long, default_value_t = 1.4)]
    speed: f64,

    /// Tap distance, metres.
    #[arg(long, default_value_t = 1.5)]
    reach: f64,

    /// Simulated time between fixes, milliseconds.
    #[arg(long, default_value_t = 1_000)]
    step_ms: u64,

    /// Give up after this many steps.
    #[arg(long, default_value_t = 600)]
    max_steps: u32,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints the moments a player would notice.
#[derive(Default)]
struct ConsoleObserver {
    passes:    usize,
    rendered:  usize,
    errors:    usize,
    finished:  Option<(Millis, u32)>,
}

impl HuntObserver for ConsoleObserver {
    fn on_seeded(&mut self, origin: &Fix, treasures: &[Treasure]) {
        println!("{} treasures hidden around {}", treasures.len(), origin.coordinate);
    }

    fn on_projection(&mut self, _fix: &Fix, placements: &[Placement]) {
        self.passes += 1;
        self.rendered = placements.len();
    }

    fn on_collected(&mut self, id: TreasureId, points: u8, score: u32) {
        println!("  collected {id:<11} +{points:<2} → score {score}");
    }

    fn on_all_found(&mut self, at: Millis, score: u32) {
        self.finished = Some((at, score));
    }

    fn on_tracking_error(&mut self, error: LocationError) {
        self.errors += 1;
        println!("  (tracking error: {error})");
    }

    fn on_message(&mut self, at: Millis, text: &str) {
        println!("[{:>9}] {text}", at.to_string());
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<HuntConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => HuntConfig::default(),
    };
    if args.debug {
        config.debug_mode = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Treasures currently in the scene that the walker can tap this step.
fn tappable(session: &HuntSession<SceneGraph, TextUi>, walker: &Walker) -> Vec<TreasureId> {
    let debug = session.config().debug_mode;
    session
        .scene()
        .entities()
        .filter_map(|entity| session.state().treasure(entity.id))
        .filter(|t| debug || walker.can_reach(t))
        .map(Treasure::id)
        // One tap per step: a thumb, not a rake.
        .take(1)
        .collect()
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    println!("=== walkabout — rust_hunt ===");
    println!(
        "Treasures: {}  |  Mode: {}  |  Seed: {}",
        config.treasure_count,
        if config.debug_mode { "debug ring" } else { "gps" },
        config.seed.map_or_else(|| "random".to_owned(), |s| s.to_string()),
    );
    println!();

    let start = Coordinate::new(args.lat, args.lon);
    let mut track = match &args.track {
        Some(path) => Some(
            TrackSource::from_path(path).with_context(|| format!("loading track {}", path.display()))?,
        ),
        None => None,
    };
    // The simulated walk pushes its own fixes onto this source's stream.
    let mut scripted = ScriptedSource::new(Ok(Fix::new(start, Millis::ZERO)), Vec::new());

    let mut session = SessionBuilder::new(config, SceneGraph::new(), TextUi::new()).build()?;
    let mut obs = ConsoleObserver::default();

    match track.as_mut() {
        Some(track) => session.start(track, Millis::ZERO, &mut obs)?,
        None => session.start(&mut scripted, Millis::ZERO, &mut obs)?,
    }

    let origin = session.last_fix().map_or(start, |fix| fix.coordinate);
    let mut walker = Walker::new(origin, args.speed, args.reach);
    let mut now = Millis::ZERO;
    let mut walked_m = 0.0;

    for _ in 0..args.max_steps {
        now = now + args.step_ms;

        if track.is_none() {
            let goal = walker.target(session.state().treasures()).map(Treasure::position);
            if let Some(goal) = goal {
                walked_m += walker.step_towards(goal, args.step_ms);
            }
            scripted.push(Ok(Fix::new(walker.position, now).with_accuracy(3.0)));
            session.pump(&mut obs);
        } else {
            if !session.pump_one(&mut obs) {
                break;
            }
            if let Some(fix) = session.last_fix() {
                now = now.max(fix.timestamp);
                walked_m += walker.position.distance_m(fix.coordinate);
                walker.position = fix.coordinate;
            }
        }
        session.advance_to(now, &mut obs);

        for id in tappable(&session, &walker) {
            session.activate(id, &mut obs)?;
        }
        if session.state().is_complete() {
            break;
        }
    }

    // Let the deferred messages play out.
    let settle = session.config().victory_delay_ms + session.config().message_duration_ms;
    session.advance_to(now + settle, &mut obs);
    session.stop_tracking();

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    match obs.finished {
        Some((at, score)) => println!("All treasures found by {at} with {score} points."),
        None => println!(
            "Stopped at {now}: {} of {} treasures found.",
            session.state().collected_count(),
            session.state().treasures().len()
        ),
    }
    println!(
        "Walked {walked_m:.1} m over {} projection passes ({} tracking errors, {} visible at the end).",
        obs.passes, obs.errors, obs.rendered
    );
    println!();

    println!("{:<12} {:<6} {:>6} {:>10} {:<9}", "Treasure", "Kind", "Points", "Dist (m)", "Found");
    println!("{}", "-".repeat(47));
    for t in session.state().treasures() {
        println!(
            "{:<12} {:<6} {:>6} {:>10.1} {:<9}",
            t.id().to_string(),
            t.kind().as_str(),
            t.points(),
            walker.position.distance_m(t.position()),
            if t.is_collected() { "yes" } else { "no" },
        );
    }

    Ok(())
}
