//! Hat Runner - an endless side-scrolling jump-over-obstacles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `driver`: Fixed-timestep frame driver fed by the host clock
//! - `session`: Session object owned by the host loop (sim + driver + render)
//! - `renderer`: Draw commands, tessellation and the WebGPU pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod driver;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use session::{Frame, Key, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Duration of one simulation tick (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Host frame deltas longer than this are clamped (tab switch, debugger)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity set by a jump (negative = upward)
    pub const JUMP_FORCE: f32 = -15.0;

    /// Horizontal scroll speed at the start of a run (pixels per tick)
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed added at each score milestone
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Points between speed-ups
    pub const SPEED_MILESTONE: u32 = 5;

    /// Time between obstacle pair spawns
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 80.0;
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 50.0;
    /// Horizontal gap between the two obstacles of a pair
    pub const PAIR_MIN_GAP: f32 = 100.0;
    pub const PAIR_MAX_GAP: f32 = 200.0;

    /// Decorative clouds
    pub const CLOUD_COUNT: usize = 5;

    /// Height of the grass strip drawn at the bottom of the surface
    pub const GROUND_STRIP_HEIGHT: f32 = 20.0;

    /// Autopilot jumps when an obstacle is this many ticks away
    pub const AUTOPILOT_LEAD_TICKS: f32 = 8.0;
}

/// Text shown by the score display
pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}
