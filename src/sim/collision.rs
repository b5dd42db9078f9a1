//! Collision detection and scoring
//!
//! Player and obstacles are axis-aligned boxes. Overlap is strict on both
//! axes, so boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleSet;
use super::state::Player;

/// Axis-aligned box in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Result of checking the player against every obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player hit an obstacle; the run is over
    Collided,
    /// No hit; `passed` obstacles were cleared this tick
    Clear { passed: u32 },
}

/// Check collisions first, then mark newly passed obstacles.
///
/// An obstacle is passed once the player's left edge is beyond its right edge.
/// Each obstacle can be passed only once.
pub fn evaluate(player: &Player, obstacles: &mut ObstacleSet) -> Outcome {
    let bounds = player.bounds();
    if obstacles.iter().any(|o| bounds.overlaps(&o.bounds())) {
        return Outcome::Collided;
    }

    let mut passed = 0;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && player.pos.x > obstacle.right() {
            obstacle.passed = true;
            passed += 1;
        }
    }
    Outcome::Clear { passed }
}

/// Award one point. Returns the new speed when the score hits a milestone.
pub fn award_point(score: &mut u32, speed: &mut f32, milestone: u32, increment: f32) -> Option<f32> {
    *score += 1;
    if score.is_multiple_of(milestone) {
        *speed += increment;
        Some(*speed)
    } else {
        None
    }
}
