//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so a
//! run can be rebalanced from JSON without touching code.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player's fixed horizontal position
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity set on jump (must be negative)
    pub jump_force: f32,

    /// Scroll speed at the start of a run
    pub base_speed: f32,
    /// Speed added every `speed_milestone` points
    pub speed_increment: f32,
    pub speed_milestone: u32,

    /// Milliseconds between obstacle pair spawns
    pub spawn_interval_ms: f32,
    pub obstacle_height: Range<f32>,
    pub obstacle_width: Range<f32>,
    pub pair_gap: Range<f32>,

    /// Decorative clouds in the sky
    pub cloud_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_milestone: SPEED_MILESTONE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            obstacle_height: OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT,
            obstacle_width: OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH,
            pair_gap: PAIR_MIN_GAP..PAIR_MAX_GAP,

            cloud_count: CLOUD_COUNT,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or fields of the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse a tuning document. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Serialize back to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.player_width > 0.0) {
            return invalid("player_width", "must be positive");
        }
        if !(self.player_height > 0.0) {
            return invalid("player_height", "must be positive");
        }
        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.jump_force < 0.0) {
            return invalid("jump_force", "must be negative (upward)");
        }
        if !(self.base_speed >= 0.0) {
            return invalid("base_speed", "must not be negative");
        }
        if !(self.speed_increment >= 0.0) {
            return invalid("speed_increment", "must not be negative");
        }
        if self.speed_milestone == 0 {
            return invalid("speed_milestone", "must be at least 1");
        }
        if !(self.spawn_interval_ms > 0.0) {
            return invalid("spawn_interval_ms", "must be positive");
        }
        if !valid_range(&self.obstacle_height) {
            return invalid("obstacle_height", "must be a non-empty positive range");
        }
        if !valid_range(&self.obstacle_width) {
            return invalid("obstacle_width", "must be a non-empty positive range");
        }
        if !(self.pair_gap.start >= 0.0 && self.pair_gap.start < self.pair_gap.end) {
            return invalid("pair_gap", "must be a non-empty range starting at 0 or more");
        }
        Ok(())
    }
}

fn valid_range(range: &Range<f32>) -> bool {
    range.start > 0.0 && range.start < range.end
}
