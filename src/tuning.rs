//! Gameplay tuning
//!
//! Defaults reproduce the classic feel. Overrides come from a JSON document
//! where every field is optional.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GAP_MARGIN, GROUND_HEIGHT, HEIGHT};

/// Physics and pacing constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a flap (px/s, negative = up)
    pub flap_impulse: f32,

    // === Pipes ===
    /// Vertical size of the passable window (px)
    pub pipe_gap: f32,
    /// Horizontal pipe velocity (px/s, negative = leftward)
    pub pipe_speed: f32,
    /// Seconds between timed spawns
    pub spawn_interval: f32,

    // === Bird pose ===
    /// Nose-down tilt at full fall speed (degrees)
    pub max_drop_angle: f32,
    /// Nose-up tilt at full climb speed (degrees, negative)
    pub max_rise_angle: f32,
    /// Fall speed at which the drop tilt saturates (px/s)
    pub drop_saturation: f32,
    /// Climb speed at which the rise tilt saturates (px/s)
    pub rise_saturation: f32,
    /// Wing animation rate while playing (frames per second)
    pub flap_anim_rate: f32,

    // === Idle bob ===
    /// Bob amplitude around the midline (px)
    pub bob_amplitude: f32,
    /// Bob angular frequency (rad/s)
    pub bob_frequency: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2200.0,
            flap_impulse: -520.0,

            pipe_gap: 160.0,
            pipe_speed: -160.0,
            spawn_interval: 1.25,

            max_drop_angle: 80.0,
            max_rise_angle: -25.0,
            drop_saturation: 600.0,
            rise_saturation: 500.0,
            flap_anim_rate: 10.0,

            bob_amplitude: 8.0,
            bob_frequency: 2.2,
        }
    }
}

/// Rejected tuning document
#[derive(Debug)]
pub enum TuningError {
    /// Malformed JSON or a field of the wrong type
    Json(serde_json::Error),
    /// Parsed, but a value makes the game unplayable
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "tuning JSON error: {e}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.spawn_interval > 0.0) {
            return Err(TuningError::Invalid("spawn_interval must be positive"));
        }
        if !(self.pipe_speed < 0.0) {
            return Err(TuningError::Invalid("pipe_speed must be negative (leftward)"));
        }
        if !(self.pipe_gap > 0.0) {
            return Err(TuningError::Invalid("pipe_gap must be positive"));
        }
        if self.pipe_gap > HEIGHT - GROUND_HEIGHT - 2.0 * GAP_MARGIN as f32 {
            return Err(TuningError::Invalid("pipe_gap does not fit between ceiling and ground"));
        }
        if !(self.drop_saturation > 0.0 && self.rise_saturation > 0.0) {
            return Err(TuningError::Invalid("tilt saturation speeds must be positive"));
        }
        Ok(())
    }
}
