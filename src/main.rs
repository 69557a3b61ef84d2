//! Fruit Slice entry point
//!
//! Wires the settings, the position source thread, the game loop and a
//! renderer together, then reports the final score.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use fruit_slice::render::{HeadlessRenderer, Renderer};
use fruit_slice::sim::GameState;
use fruit_slice::tracking::{self, ScreenMapping, SweepDetector, TrackingHandle};
use fruit_slice::{FramePacer, GameError, GameLoop, PositionChannel, Settings, logging};

/// Hand-tracked fruit slicing arcade game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without a window, driven by a synthetic fingertip
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames (headless only)
    #[arg(long)]
    frames: Option<u64>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), GameError> {
    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    if args.print_config {
        println!("{}", settings.to_json());
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let bounds = settings.display.bounds();
    let state = GameState::new(seed, bounds, settings.tuning.clone())?;

    let channel = Arc::new(PositionChannel::new());
    let mapping = ScreenMapping::new(bounds, &settings.tracking);
    let poll_interval = Duration::from_millis(settings.tracking.poll_interval_ms);
    let pacer = FramePacer::new(settings.display.target_fps);
    let mut game = GameLoop::new(state, Arc::clone(&channel), pacer);

    #[cfg(feature = "window")]
    let (mut renderer, source) = if args.headless {
        start_headless(args.frames, mapping, &channel, poll_interval)?
    } else {
        start_window(&settings, mapping, &channel, poll_interval)?
    };
    #[cfg(not(feature = "window"))]
    let (mut renderer, source) = {
        if !args.headless {
            log::warn!("Built without the `window` feature, running headless");
        }
        start_headless(args.frames, mapping, &channel, poll_interval)?
    };

    let result = game.run(renderer.as_mut());
    // Stop the tracker whether or not the game ended cleanly
    let summary = source.shutdown_after(result)?;

    println!(
        "Game over: {:?}. Score {}, missed {}/{}.",
        summary.reason, summary.score, summary.missed, settings.tuning.max_missed
    );
    Ok(())
}

type Frontend = (Box<dyn Renderer>, TrackingHandle);

/// No display; a synthetic fingertip sweeps the screen
fn start_headless(
    frames: Option<u64>,
    mut mapping: ScreenMapping,
    channel: &Arc<PositionChannel>,
    poll_interval: Duration,
) -> Result<Frontend, GameError> {
    let renderer = match frames {
        Some(frames) => HeadlessRenderer::with_budget(frames),
        None => HeadlessRenderer::unbounded(),
    };
    // Synthetic hand, already in screen orientation
    mapping.mirror = false;
    let source = tracking::spawn_position_source(
        SweepDetector::new(30),
        mapping,
        Arc::clone(channel),
        poll_interval,
    )?;
    Ok((Box::new(renderer), source))
}

/// Native window; the mouse stands in for the camera
#[cfg(feature = "window")]
fn start_window(
    settings: &Settings,
    mut mapping: ScreenMapping,
    channel: &Arc<PositionChannel>,
    poll_interval: Duration,
) -> Result<Frontend, GameError> {
    use fruit_slice::render::WindowRenderer;
    use fruit_slice::tracking::PointerDetector;
    use std::sync::mpsc;

    let (pointer_tx, pointer_rx) = mpsc::channel();
    let renderer = WindowRenderer::new(settings.display.bounds(), settings.display.fullscreen)?
        .with_pointer(pointer_tx);

    // Pointer coordinates are not mirrored like a camera image
    mapping.mirror = false;
    let source = tracking::spawn_position_source(
        PointerDetector::new(pointer_rx),
        mapping,
        Arc::clone(channel),
        poll_interval,
    )?;
    Ok((Box::new(renderer), source))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
