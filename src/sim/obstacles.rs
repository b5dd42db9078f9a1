//! Obstacles and the ordered set that scrolls them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// A ground obstacle the player must jump over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the player has cleared it (scored)
    pub passed: bool,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            passed: false,
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully scrolled past the left edge of the surface
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Active obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    items: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn push(&mut self, obstacle: Obstacle) {
        self.items.push(obstacle);
    }

    /// Scroll every obstacle left by the same amount
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.items {
            obstacle.pos.x -= speed;
        }
    }

    /// Drop obstacles that have left the surface. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|o| !o.is_off_screen());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Obstacle> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
