use anyhow::{Context, Result};
use clap::Parser;
use glam::IVec2;
use log::{info, warn};
use std::path::Path;

use led_wall::cli::Cli;
use led_wall::config::ConfigFile;
use led_wall::core::{InputEvent, InputQueue, Session, SurfaceRegistry};
use led_wall::display::{compose, save_ppm, Display, FrameCapture};

// === Script Loading ===

/// A script is a list of ticks; each tick is the events queued before it runs
fn load_script(path: &Path) -> Result<Vec<Vec<InputEvent>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input script: {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse input script: {:?}", path))
}

/// Smallest canvas that holds every surface at its placement
fn wall_bounds(registry: &SurfaceRegistry) -> (i32, i32) {
    let max = registry
        .list()
        .fold(IVec2::ONE, |acc, (_, placement)| acc.max(placement.max()));
    (max.x, max.y)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ConfigFile::open(&cli.config)?;
    let registry = config
        .config()
        .build_registry()
        .with_context(|| format!("Invalid screen config {:?}", config.path()))?;
    info!("{} screens configured", registry.len());

    let mut session = Session::new(registry);
    let mut display = Display::new(FrameCapture::new());
    let mut queue = InputQueue::with_capacity(cli.queue_capacity);

    let ticks = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    for (number, events) in ticks.into_iter().enumerate() {
        for event in events {
            if let Err(full) = queue.push(event) {
                warn!("tick {}: {}, flushing early", number, full);
                display.draw(&mut session, &mut queue, &mut config)?;
                queue.push(full.event)?;
            }
        }

        let report = display.draw(&mut session, &mut queue, &mut config)?;
        info!(
            "tick {}: {} events, {} moved, {} rejected",
            number,
            report.processed,
            report.moved.len(),
            report.rejected.len()
        );
    }

    let (width, height) = cli.canvas.unwrap_or_else(|| wall_bounds(session.registry()));
    let wall = compose(session.registry(), width, height, cli.background)
        .with_context(|| format!("Cannot compose a {}x{} canvas", width, height))?;
    save_ppm(&cli.output, &wall)?;

    println!(
        "Wrote {}x{} wall with {} screens to {:?}",
        width,
        height,
        session.registry().len(),
        cli.output
    );
    Ok(())
}
