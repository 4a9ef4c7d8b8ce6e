//! Flappy Sim - simulation core for a one-button reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session state)
//! - `tuning`: Data-driven gameplay constants

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Fixed playfield geometry
pub mod consts {
    /// Nominal frame interval (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const WIDTH: f32 = 400.0;
    pub const HEIGHT: f32 = 600.0;
    /// Height of the ground strip at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Left edge of the bird sprite
    pub const BIRD_X: f32 = 84.0;
    /// Unrotated bird sprite size
    pub const BIRD_WIDTH: u32 = 34;
    pub const BIRD_HEIGHT: u32 = 24;
    /// Wing animation frames (up, mid, down)
    pub const BIRD_FRAMES: f32 = 3.0;
    /// Idle wing animation rate (frames per second)
    pub const IDLE_ANIM_RATE: f32 = 6.0;

    /// Pipe sprite size
    pub const PIPE_WIDTH: u32 = 52;
    pub const PIPE_HEIGHT: u32 = 320;

    /// First obstacle of a run spawns this far past the right edge
    pub const FIRST_SPAWN_OFFSET: f32 = 80.0;
    /// Timed spawns appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Gap keeps this distance from the ceiling and the ground
    pub const GAP_MARGIN: i32 = 48;
    /// Pipe is culled once its right edge is this far past the left edge
    pub const OFFSCREEN_MARGIN: f32 = 5.0;

    /// Bird top may rise this far above the playfield before it is clamped
    pub const CEILING_ALLOWANCE: f32 = 40.0;
    /// Bird sinks this far into the ground texture before the crash registers
    pub const GROUND_OVERLAP: f32 = 10.0;

    /// Ground scroll rate as a fraction of pipe speed
    pub const SCROLL_FACTOR: f32 = 0.25;
}

/// Vertical center of the playfield, where the bird spawns and bobs
#[inline]
pub fn midline() -> f32 {
    consts::HEIGHT / 2.0
}

/// Top edge of the bird sprite at which the ground crash registers
#[inline]
pub fn ground_threshold() -> f32 {
    use consts::*;
    HEIGHT - GROUND_HEIGHT - BIRD_HEIGHT as f32 + GROUND_OVERLAP
}
