//! The scrolling procession of pipes
//!
//! Spawns on a fixed interval, scrolls every pipe left and culls the ones
//! that have left the playfield. Pass marking belongs to the session, which
//! interleaves it with collision in field order.

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::rng::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;

/// Live obstacles in spawn order (left to right on screen)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
}

impl ObstacleField {
    /// Fresh field holding the single opening obstacle
    pub fn new(tuning: &Tuning, rng: &mut impl RandomSource) -> Self {
        let gap_y = spawn_gap_y(tuning.pipe_gap, rng);
        Self {
            obstacles: vec![Obstacle::new(WIDTH + FIRST_SPAWN_OFFSET, gap_y, tuning.pipe_gap)],
            spawn_timer: 0.0,
        }
    }

    /// Spawn, scroll and cull for one tick of `dt` seconds
    pub fn tick(&mut self, dt: f32, tuning: &Tuning, rng: &mut impl RandomSource) {
        debug_assert!(dt >= 0.0, "negative dt {dt}");

        // Catch up on every interval crossed, keeping the remainder
        let existing = self.obstacles.len();
        self.spawn_timer += dt;
        while self.spawn_timer >= tuning.spawn_interval {
            self.spawn_timer -= tuning.spawn_interval;
            let gap_y = spawn_gap_y(tuning.pipe_gap, rng);
            log::debug!("Spawning obstacle with gap at y={}", gap_y);
            self.obstacles
                .push(Obstacle::new(WIDTH + SPAWN_OFFSET, gap_y, tuning.pipe_gap));
        }

        // New spawns start moving next tick
        for obstacle in &mut self.obstacles[..existing] {
            obstacle.advance(dt, tuning.pipe_speed);
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        if self.obstacles.len() != before {
            log::debug!("Culled {} obstacle(s)", before - self.obstacles.len());
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

/// Inclusive range of gap centers keeping the whole gap on screen
///
/// Collapses to a single midpoint when the gap is too large for the band.
pub fn gap_center_range(gap_size: f32) -> (i32, i32) {
    let half_gap = (gap_size / 2.0) as i32;
    let lo = GAP_MARGIN + half_gap;
    let hi = (HEIGHT - GROUND_HEIGHT) as i32 - GAP_MARGIN - half_gap;
    if lo > hi {
        let mid = (lo + hi) / 2;
        log::warn!("Gap of {} px does not fit the spawn band, centering at {}", gap_size, mid);
        return (mid, mid);
    }
    (lo, hi)
}

/// Random gap center for a new obstacle
pub fn spawn_gap_y(gap_size: f32, rng: &mut impl RandomSource) -> f32 {
    let (lo, hi) = gap_center_range(gap_size);
    rng.range_inclusive(lo, hi) as f32
}
