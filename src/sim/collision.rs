//! Pixel-accurate collision between the bird and pipes
//!
//! Bounding boxes are only a rejection test. A hit needs an opaque bird pixel
//! on top of an opaque pipe pixel, so grazing the bird's rounded outline
//! against a pipe lip is a miss.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::mask::{Mask, Silhouette, pixel_origin};
use super::obstacle::{Obstacle, Rect};
use super::player::bird_body_mask;
use crate::consts::{PIPE_HEIGHT, PIPE_WIDTH};

/// Which half of a pipe pair was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipePart {
    Top,
    Bottom,
}

/// Source silhouettes, built once per session
#[derive(Debug, Clone)]
pub struct CollisionMasks {
    /// Unrotated bird body
    pub bird: Mask,
    /// One pipe body (top and bottom pipes share it)
    pub pipe: Mask,
}

impl Default for CollisionMasks {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionMasks {
    pub fn new() -> Self {
        Self {
            bird: bird_body_mask(),
            pipe: Mask::filled(PIPE_WIDTH, PIPE_HEIGHT),
        }
    }

    /// Test the bird against both pipes of one obstacle
    ///
    /// Returns the struck pipe and the first shared pixel in playfield
    /// coordinates. The top pipe is tested first.
    pub fn bird_obstacle_collision(&self, bird: &Silhouette, obstacle: &Obstacle) -> Option<(PipePart, IVec2)> {
        let bird_box = Rect::new(bird.origin.as_vec2(), bird.mask.size().as_vec2());
        [
            (PipePart::Top, obstacle.top_rect()),
            (PipePart::Bottom, obstacle.bottom_rect()),
        ]
        .into_iter()
        .filter(|(_, rect)| rect.intersects(&bird_box))
        .find_map(|(part, rect)| {
            bird.overlap(&self.pipe, pixel_origin(rect.min))
                .map(|p| (part, p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::Bird;

    fn level_bird_at(x: f32, y: f32) -> Bird {
        let mut bird = Bird::new();
        bird.pos = glam::Vec2::new(x, y);
        bird
    }

    #[test]
    fn test_bird_in_gap_misses() {
        let masks = CollisionMasks::new();
        let bird = level_bird_at(200.0, 250.0);
        let obstacle = Obstacle::new(200.0, 250.0, 160.0);
        assert!(masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle).is_none());
    }

    #[test]
    fn test_bird_inside_top_pipe_hits() {
        let masks = CollisionMasks::new();
        let bird = level_bird_at(200.0, 100.0);
        let obstacle = Obstacle::new(200.0, 250.0, 160.0);
        let hit = masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle);
        assert!(matches!(hit, Some((PipePart::Top, _))));
    }

    #[test]
    fn test_bird_inside_bottom_pipe_hits() {
        let masks = CollisionMasks::new();
        let bird = level_bird_at(200.0, 400.0);
        let obstacle = Obstacle::new(200.0, 250.0, 160.0);
        let hit = masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle);
        assert!(matches!(hit, Some((PipePart::Bottom, _))));
    }

    #[test]
    fn test_far_obstacle_misses() {
        let masks = CollisionMasks::new();
        let bird = level_bird_at(101.0, 100.0);
        // Boxes don't overlap horizontally at all
        let obstacle = Obstacle::new(400.0, 250.0, 160.0);
        assert!(masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle).is_none());
    }

    #[test]
    fn test_corner_graze_is_a_miss() {
        let masks = CollisionMasks::new();
        // Bird box spans x 84..118, y 288..312
        let bird = level_bird_at(101.0, 300.0);
        let sil = bird.silhouette(&masks.bird);
        assert_eq!(sil.origin, IVec2::new(84, 288));

        // Bottom pipe whose top-left 2x2 pixels sit on the bird's empty
        // bottom-right corner: boxes overlap, silhouettes don't
        let gap_bottom = 310.0;
        let obstacle = Obstacle::new(116.0 + PIPE_WIDTH as f32 / 2.0, gap_bottom - 80.0, 160.0);
        assert_eq!(pixel_origin(obstacle.bottom_rect().min), IVec2::new(116, 310));
        assert!(obstacle.bottom_rect().intersects(&Rect::new(
            sil.origin.as_vec2(),
            sil.mask.size().as_vec2()
        )));
        assert!(masks.bird_obstacle_collision(&sil, &obstacle).is_none());
    }

    #[test]
    fn test_one_pixel_overlap_hits() {
        let masks = CollisionMasks::new();
        let bird = level_bird_at(101.0, 300.0);
        let sil = bird.silhouette(&masks.bird);
        // Leftmost body column is opaque only on rows 9..=14
        assert!(!masks.bird.get(0, 8));
        assert!(masks.bird.get(0, 9));

        // Top pipe whose bottom-right pixel is exactly (84, 297)
        let obstacle = Obstacle::new(85.0 - PIPE_WIDTH as f32 / 2.0, 298.0 + 80.0, 160.0);
        let hit = masks.bird_obstacle_collision(&sil, &obstacle);
        assert_eq!(hit, Some((PipePart::Top, IVec2::new(84, 297))));

        // One row higher and nothing touches
        let obstacle = Obstacle::new(85.0 - PIPE_WIDTH as f32 / 2.0, 297.0 + 80.0, 160.0);
        assert!(masks.bird_obstacle_collision(&sil, &obstacle).is_none());
    }

    #[test]
    fn test_rotation_changes_outcome() {
        let masks = CollisionMasks::new();
        // Level bird whose box top sits one row under the top pipe
        let mut bird = level_bird_at(200.0, 183.0);
        let obstacle = Obstacle::new(200.0, 250.0, 160.0);
        assert!(masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle).is_none());

        // Steep nose-down tilt stands the body up into the pipe
        bird.angle = 80.0;
        let hit = masks.bird_obstacle_collision(&bird.silhouette(&masks.bird), &obstacle);
        assert!(matches!(hit, Some((PipePart::Top, _))));
    }
}
