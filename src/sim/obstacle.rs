//! Pipe pairs: one gapped barrier scrolling right to left

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// A top and bottom pipe with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Horizontal center of both pipes
    pub center_x: f32,
    /// Vertical center of the gap (fixed at spawn)
    pub gap_center_y: f32,
    /// Vertical size of the gap (fixed at spawn)
    pub gap_size: f32,
    /// Set once the pipe falls behind the bird; never cleared
    pub passed: bool,
}

impl Obstacle {
    pub fn new(center_x: f32, gap_center_y: f32, gap_size: f32) -> Self {
        Self {
            center_x,
            gap_center_y,
            gap_size,
            passed: false,
        }
    }

    /// Scroll by `speed * dt` (speed is negative)
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.center_x += speed * dt;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center_x - PIPE_WIDTH as f32 / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center_x + PIPE_WIDTH as f32 / 2.0
    }

    /// Gap top edge (bottom of the upper pipe)
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center_y - self.gap_size / 2.0
    }

    /// Gap bottom edge (top of the lower pipe)
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center_y + self.gap_size / 2.0
    }

    /// Upper pipe body, hanging down to the gap
    pub fn top_rect(&self) -> Rect {
        let size = Vec2::new(PIPE_WIDTH as f32, PIPE_HEIGHT as f32);
        Rect::new(Vec2::new(self.left(), self.gap_top() - size.y), size)
    }

    /// Lower pipe body, standing up from the gap
    pub fn bottom_rect(&self) -> Rect {
        let size = Vec2::new(PIPE_WIDTH as f32, PIPE_HEIGHT as f32);
        Rect::new(Vec2::new(self.left(), self.gap_bottom()), size)
    }

    /// Fully past the left edge by more than the margin
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < -OFFSCREEN_MARGIN
    }

    /// Flip `passed` the first time the pipe center falls behind `player_x`
    ///
    /// Returns true exactly once per obstacle (the scoring signal).
    pub fn check_and_mark_passed(&mut self, player_x: f32) -> bool {
        if !self.passed && self.center_x < player_x {
            self.passed = true;
            return true;
        }
        false
    }
}
