//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the host owns it and passes
//! it to the tick functions explicitly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacles::ObstacleSet;
use super::spawner::ObstacleGenerator;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start control
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick or transition, for hosts to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    /// A new obstacle pair entered from the right edge
    ObstaclesSpawned,
    /// Score went up by one
    Scored { score: u32 },
    /// A score milestone raised the scroll speed
    SpeedUp { speed: f32 },
    GameOver { score: u32 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_force: f32,
    /// Airborne; cleared only by landing
    pub jumping: bool,
}

impl Player {
    pub fn new(tuning: &Tuning, surface_height: f32) -> Self {
        let mut player = Self {
            pos: Vec2::new(tuning.player_x, 0.0),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            gravity: tuning.gravity,
            jump_force: tuning.jump_force,
            jumping: false,
        };
        player.land(surface_height);
        player
    }

    /// Top edge of the player when standing on the ground
    #[inline]
    pub fn ground_y(&self, surface_height: f32) -> f32 {
        surface_height - self.size.y
    }

    /// Integrate gravity. `dt_factor` is elapsed time in ticks (1.0 at 60 Hz).
    pub fn update(&mut self, dt_factor: f32, surface_height: f32) {
        self.vel_y += self.gravity * dt_factor;
        self.pos.y += self.vel_y * dt_factor;

        if self.pos.y >= self.ground_y(surface_height) {
            self.land(surface_height);
        }
    }

    /// Start a jump. No-op while airborne (no double jump).
    pub fn jump(&mut self) {
        if !self.jumping {
            self.vel_y = self.jump_force;
            self.jumping = true;
        }
    }

    /// Snap to the ground line and stop vertical motion
    pub fn land(&mut self, surface_height: f32) {
        self.pos.y = self.ground_y(surface_height);
        self.vel_y = 0.0;
        self.jumping = false;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A background cloud. Purely decorative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub width: f32,
    /// Leftward drift per tick
    pub speed: f32,
}

impl Cloud {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, surface_width: f32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..surface_width.max(1.0)),
                rng.random_range(50.0..150.0),
            ),
            width: rng.random_range(50.0..150.0),
            speed: rng.random_range(1.0..3.0),
        }
    }

    /// Drift left, wrapping back in from the right edge at a new height
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R, surface_width: f32, dt_factor: f32) {
        self.pos.x -= self.speed * dt_factor;
        if self.pos.x < -self.width {
            self.pos.x = surface_width + self.width;
            self.pos.y = rng.random_range(50.0..150.0);
        }
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Current scroll speed (pixels per tick)
    pub speed: f32,
    /// Drawable surface size in pixels
    pub surface: Vec2,
    pub player: Player,
    pub obstacles: ObstacleSet,
    pub spawner: ObstacleGenerator,
    pub clouds: Vec<Cloud>,
    /// Simulation ticks since the run started
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Gameplay RNG (obstacle sizes and gaps)
    #[serde(skip)]
    pub rng: Pcg32,
    /// Separate stream so decoration never perturbs obstacle generation
    #[serde(skip)]
    pub cloud_rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and surface size
    pub fn new(seed: u64, tuning: Tuning, width: f32, height: f32) -> Self {
        let mut cloud_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud::random(&mut cloud_rng, width))
            .collect();

        Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            speed: tuning.base_speed,
            surface: Vec2::new(width, height),
            player: Player::new(&tuning, height),
            obstacles: ObstacleSet::default(),
            spawner: ObstacleGenerator::new(&tuning),
            clouds,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            cloud_rng,
            tuning,
        }
    }

    /// Put every run-scoped value back to its initial state.
    /// Clouds and the RNG streams carry over.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.spawner.reset();
        self.player = Player::new(&self.tuning, self.surface.y);
        self.time_ticks = 0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn player() -> Player {
        Player::new(&Tuning::default(), 600.0)
    }

    #[test]
    fn test_player_starts_on_ground() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(100.0, 520.0));
        assert_eq!(p.vel_y, 0.0);
        assert!(!p.jumping);
    }

    #[test]
    fn test_gravity_keeps_grounded_player_on_ground() {
        let mut p = player();
        for _ in 0..10 {
            p.update(1.0, 600.0);
        }
        assert_eq!(p.pos.y, 520.0);
        assert_eq!(p.vel_y, 0.0);
    }

    #[test]
    fn test_jump_moves_player_up() {
        let mut p = player();
        p.jump();
        assert_eq!(p.vel_y, JUMP_FORCE);
        assert!(p.jumping);

        p.update(1.0, 600.0);
        assert!((p.vel_y - (JUMP_FORCE + GRAVITY)).abs() < 1e-5);
        assert!((p.pos.y - (520.0 + JUMP_FORCE + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_no_double_jump() {
        let mut p = player();
        p.jump();
        p.update(1.0, 600.0);
        let vel = p.vel_y;
        p.jump();
        assert_eq!(p.vel_y, vel);
        assert!(p.jumping);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut p = player();
        p.jump();
        let mut peak = p.pos.y;
        for _ in 0..60 {
            p.update(1.0, 600.0);
            peak = peak.min(p.pos.y);
        }
        assert!(peak < 400.0, "jump should clear tall obstacles, peak={peak}");
        assert_eq!(p.pos.y, 520.0);
        assert!(!p.jumping);
        assert_eq!(p.vel_y, 0.0);
    }

    #[test]
    fn test_land_resets_flags() {
        let mut p = player();
        p.jump();
        p.update(1.0, 600.0);
        p.land(400.0);
        assert_eq!(p.pos.y, 320.0);
        assert_eq!(p.vel_y, 0.0);
        assert!(!p.jumping);
    }

    #[test]
    fn test_cloud_wraps_to_right_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut cloud = Cloud {
            pos: Vec2::new(-79.0, 60.0),
            width: 80.0,
            speed: 2.0,
        };
        cloud.drift(&mut rng, 800.0, 1.0);
        assert_eq!(cloud.pos.x, 880.0);
        assert!((50.0..150.0).contains(&cloud.pos.y));
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, Tuning::default(), 800.0, 600.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, BASE_SPEED);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.clouds.len(), CLOUD_COUNT);
        assert!(!state.is_running());
    }

    #[test]
    fn test_clouds_are_seeded() {
        let a = GameState::new(11, Tuning::default(), 800.0, 600.0);
        let b = GameState::new(11, Tuning::default(), 800.0, 600.0);
        for (ca, cb) in a.clouds.iter().zip(&b.clouds) {
            assert_eq!(ca.pos, cb.pos);
            assert_eq!(ca.width, cb.width);
        }
    }
}
