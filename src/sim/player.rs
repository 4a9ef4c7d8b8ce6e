//! The player-controlled bird

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::{Mask, Silhouette, pixel_origin};
use crate::consts::*;
use crate::midline;
use crate::tuning::Tuning;

/// The bird: fixed column, free vertical motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Sprite center (x never changes after spawn)
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive = down)
    pub vel_y: f32,
    /// Tilt in degrees (positive = nose-down)
    pub angle: f32,
    /// Wing animation phase in [0, BIRD_FRAMES)
    pub frame_phase: f32,
    pub alive: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    /// Fresh bird at the spawn column, level, on the midline
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(BIRD_X + BIRD_WIDTH as f32 / 2.0, midline()),
            vel_y: 0.0,
            angle: 0.0,
            frame_phase: 0.0,
            alive: true,
        }
    }

    /// Replace velocity with the flap impulse (no stacking)
    pub fn flap(&mut self, tuning: &Tuning) {
        if self.alive {
            self.vel_y = tuning.flap_impulse;
        }
    }

    /// Advance one physics step
    ///
    /// Gravity is applied to velocity first and the updated velocity moves the
    /// bird (semi-implicit Euler). Animation and tilt update even when dead.
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        debug_assert!(dt >= 0.0, "negative dt {dt}");
        if self.alive {
            self.vel_y += tuning.gravity * dt;
            self.pos.y += self.vel_y * dt;
        }
        self.advance_frame(tuning.flap_anim_rate * dt);
        self.angle = tilt_for_velocity(self.vel_y, tuning);
    }

    /// Waiting-to-start animation: slow wings, level body
    pub fn idle_animate(&mut self, dt: f32) {
        self.advance_frame(IDLE_ANIM_RATE * dt);
        self.angle = 0.0;
    }

    /// Override height with the idle bob at wall time `t` seconds
    pub fn idle_bob(&mut self, t: f32, tuning: &Tuning) {
        self.pos.y = midline() + (t * tuning.bob_frequency).sin() * tuning.bob_amplitude;
    }

    fn advance_frame(&mut self, frames: f32) {
        self.frame_phase = (self.frame_phase + frames).rem_euclid(BIRD_FRAMES);
    }

    /// Index of the wing sprite to draw (0 = up, 1 = mid, 2 = down)
    #[inline]
    pub fn frame_index(&self) -> usize {
        (self.frame_phase as usize).min(BIRD_FRAMES as usize - 1)
    }

    /// Sprite top edge, measured with the unrotated reference height
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - BIRD_HEIGHT as f32 / 2.0
    }

    #[inline]
    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top + BIRD_HEIGHT as f32 / 2.0;
    }

    /// Body mask rotated to the current tilt, centered on the bird
    pub fn silhouette(&self, body: &Mask) -> Silhouette {
        let mask = body.rotated(self.angle);
        let origin = pixel_origin(self.pos - mask.size().as_vec2() / 2.0);
        Silhouette::new(mask, origin)
    }
}

/// Tilt from vertical speed, saturating independently for climb and fall
pub fn tilt_for_velocity(vel_y: f32, tuning: &Tuning) -> f32 {
    if vel_y > 0.0 {
        let t = (vel_y / tuning.drop_saturation).min(1.0);
        tuning.max_drop_angle * t
    } else {
        let t = (-vel_y / tuning.rise_saturation).min(1.0);
        tuning.max_rise_angle * t
    }
}

/// Unrotated bird outline: rounded body with a beak on the right
pub fn bird_body_mask() -> Mask {
    let (rx, ry) = (15.0_f32, 12.0_f32);
    Mask::from_fn(BIRD_WIDTH, BIRD_HEIGHT, |x, y| {
        let dx = (x as f32 + 0.5 - rx) / rx;
        let dy = (y as f32 + 0.5 - ry) / ry;
        let body = dx * dx + dy * dy <= 1.0;
        let beak = (28..BIRD_WIDTH).contains(&x) && (13..19).contains(&y);
        body || beak
    })
}
