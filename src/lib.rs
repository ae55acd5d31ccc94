pub mod cli;
pub mod config;
pub mod core;
pub mod display;

pub use crate::core::{
    Blit, Color, ColorBuffer, Direction, InputEvent, InputQueue, PlacementRect, SizeMismatch,
    SurfaceError, SurfaceRegistry,
};
