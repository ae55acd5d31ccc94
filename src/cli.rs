// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::core::Color;

#[derive(Parser, Debug, Clone)]
#[command(name = "led-wall")]
#[command(about = "Lay out LED screen surfaces, replay operator input and render the wall", long_about = None)]
pub struct Cli {
    /// Screen configuration file (created with a placeholder screen if missing)
    #[arg(long, default_value = "led-config.json")]
    pub config: PathBuf,

    /// JSON file with a list of ticks, each a list of input events
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Where to write the composed wall as a PPM image
    #[arg(long, default_value = "led-wall.ppm")]
    pub output: PathBuf,

    /// Canvas size as WIDTHxHEIGHT; defaults to the bounds of all screens
    #[arg(long, value_parser = parse_size)]
    pub canvas: Option<(i32, i32)>,

    /// Canvas background as #RRGGBB or #RRGGBBAA
    #[arg(long, default_value = "#000000")]
    pub background: Color,

    /// Maximum events accepted per tick (at least 1)
    #[arg(long, default_value_t = 64, value_parser = parse_capacity)]
    pub queue_capacity: usize,
}

/// Parse "WIDTHxHEIGHT"
pub fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse::<i32>().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let h = h.trim().parse::<i32>().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok((w, h))
}

/// Parse a queue capacity; a queue must hold at least one event
pub fn parse_capacity(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("queue capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("bad queue capacity '{}': {}", s, e)),
    }
}
