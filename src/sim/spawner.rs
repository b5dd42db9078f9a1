//! Timed obstacle generation
//!
//! Obstacles always arrive in pairs separated by a random gap, which keeps
//! every configuration passable with a single jump per obstacle.

use std::ops::Range;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacles::{Obstacle, ObstacleSet};
use crate::tuning::Tuning;

/// Spawns an obstacle pair every `interval_ms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleGenerator {
    /// Time accumulated since the last spawn
    pub timer_ms: f32,
    pub interval_ms: f32,
    pub height: Range<f32>,
    pub width: Range<f32>,
    pub gap: Range<f32>,
}

impl ObstacleGenerator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: tuning.spawn_interval_ms,
            height: tuning.obstacle_height.clone(),
            width: tuning.obstacle_width.clone(),
            gap: tuning.pair_gap.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0.0;
    }

    /// Advance the timer and spawn a pair into `obstacles` when it elapses.
    /// Returns true if a pair was spawned.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt_ms: f32,
        obstacles: &mut ObstacleSet,
        rng: &mut R,
        surface: Vec2,
    ) -> bool {
        self.timer_ms += dt_ms;
        if self.timer_ms < self.interval_ms {
            return false;
        }
        self.timer_ms = 0.0;

        let [first, second] = self.spawn_pair(rng, surface);
        log::debug!(
            "Spawned pair at x={:.1} (w={:.1}, h={:.1}) and x={:.1} (h={:.1})",
            first.pos.x,
            first.size.x,
            first.size.y,
            second.pos.x,
            second.size.y
        );
        obstacles.push(first);
        obstacles.push(second);
        true
    }

    /// Build one pair standing on the bottom of the surface, the first at the
    /// right edge and the second `gap` pixels behind it.
    pub fn spawn_pair<R: Rng + ?Sized>(&self, rng: &mut R, surface: Vec2) -> [Obstacle; 2] {
        let width = rng.random_range(self.width.clone());
        let first_height = rng.random_range(self.height.clone());
        let gap = rng.random_range(self.gap.clone());
        let second_height = rng.random_range(self.height.clone());

        let first_x = surface.x;
        let second_x = first_x + width + gap;

        [
            Obstacle::new(
                Vec2::new(first_x, surface.y - first_height),
                Vec2::new(width, first_height),
            ),
            Obstacle::new(
                Vec2::new(second_x, surface.y - second_height),
                Vec2::new(width, second_height),
            ),
        ]
    }
}
