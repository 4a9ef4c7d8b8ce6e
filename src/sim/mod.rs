//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` handed to `Session::step`
//! - Injected, seedable randomness only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod field;
pub mod mask;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod session;

pub use collision::{CollisionMasks, PipePart};
pub use field::{ObstacleField, gap_center_range, spawn_gap_y};
pub use mask::{Mask, Silhouette};
pub use obstacle::{Obstacle, Rect};
pub use player::{Bird, bird_body_mask, tilt_for_velocity};
pub use rng::{RandomSource, RngState};
#[cfg(test)]
pub use rng::ScriptedRandom;
pub use session::{
    BirdPose, CrashCause, Flow, GameEvent, InputEvent, Key, ObstaclePose, Session, SessionState,
    Snapshot,
};
