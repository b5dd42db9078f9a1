//! Gameplay core
//!
//! Physics, obstacle spawning, collisions and the phase machine. Nothing in
//! here reads a clock or touches the screen: time arrives as `dt_ms` through
//! [`tick()`], randomness comes from the seeded streams in [`GameState`], and
//! obstacles are always visited in spawn order.

pub mod collision;
pub mod obstacles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Rect, award_point, evaluate};
pub use obstacles::{Obstacle, ObstacleSet};
pub use spawner::ObstacleGenerator;
pub use state::{Cloud, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, restart, resize, start, tick};
