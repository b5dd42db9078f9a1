//! Simulation tick and phase transitions
//!
//! Core game loop that advances the run deterministically.

use super::collision::{self, Outcome};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed since the last tick
    pub jump: bool,
    /// Demo mode - the game jumps on its own
    pub autopilot: bool,
}

/// NotStarted -> Running. Ignored in any other phase.
pub fn start(state: &mut GameState) -> Option<GameEvent> {
    if state.phase != GamePhase::NotStarted {
        return None;
    }
    state.spawner.reset();
    state.time_ticks = 0;
    state.phase = GamePhase::Running;
    log::info!("Run started (seed {})", state.seed);
    Some(GameEvent::Started)
}

/// GameOver -> Running with a fresh run. Ignored in any other phase.
pub fn restart(state: &mut GameState) -> Option<GameEvent> {
    if state.phase != GamePhase::GameOver {
        return None;
    }
    state.reset();
    start(state)?;
    log::info!("Run restarted");
    Some(GameEvent::Restarted)
}

/// Surface size changed. Only the player's ground anchor follows; obstacles
/// and clouds keep their absolute coordinates.
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.surface.x = width;
    state.surface.y = height;
    state.player.land(height);
}

/// Advance the game state by `dt_ms` milliseconds (one frame is [`FRAME_MS`]).
/// Does nothing unless the game is running.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    let dt_factor = dt_ms / FRAME_MS;

    // Background
    let width = state.surface.x;
    for cloud in &mut state.clouds {
        cloud.drift(&mut state.cloud_rng, width, dt_factor);
    }

    // Player
    if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
        state.player.jump();
    }
    state.player.update(dt_factor, state.surface.y);

    // Spawn
    if state
        .spawner
        .tick(dt_ms, &mut state.obstacles, &mut state.rng, state.surface)
    {
        events.push(GameEvent::ObstaclesSpawned);
    }

    // Scroll and cull
    state.obstacles.advance(state.speed * dt_factor);
    state.obstacles.prune();

    // Collisions and scoring
    match collision::evaluate(&state.player, &mut state.obstacles) {
        Outcome::Collided => {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} after {} ticks",
                state.score,
                state.time_ticks
            );
            events.push(GameEvent::GameOver { score: state.score });
        }
        Outcome::Clear { passed } => {
            for _ in 0..passed {
                let sped_up = collision::award_point(
                    &mut state.score,
                    &mut state.speed,
                    state.tuning.speed_milestone,
                    state.tuning.speed_increment,
                );
                events.push(GameEvent::Scored { score: state.score });
                if let Some(speed) = sped_up {
                    log::debug!("Speed up to {speed} at score {}", state.score);
                    events.push(GameEvent::SpeedUp { speed });
                }
            }
        }
    }

    events
}

/// Jump when the nearest obstacle still ahead is within the reaction window
fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.player.jumping {
        return false;
    }
    let front = state.player.pos.x + state.player.size.x;
    let window = state.speed * AUTOPILOT_LEAD_TICKS;
    state
        .obstacles
        .iter()
        .filter(|o| o.right() > state.player.pos.x)
        .map(|o| o.pos.x - front)
        .min_by(|a, b| a.total_cmp(b))
        .is_some_and(|distance| distance > 0.0 && distance <= window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default(), 800.0, 600.0);
        start(&mut state);
        state
    }

    /// A run where the spawner never fires, so tests control every obstacle
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_interval_ms: 1.0e9,
            ..Default::default()
        };
        let mut state = GameState::new(1, tuning, 800.0, 600.0);
        start(&mut state);
        state
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_ignored_before_start() {
        let mut state = GameState::new(1, Tuning::default(), 800.0, 600.0);
        for _ in 0..200 {
            assert!(tick(&mut state, &jump(), FRAME_MS).is_empty());
        }
        assert_eq!(state.time_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_start_transition() {
        let mut state = GameState::new(1, Tuning::default(), 800.0, 600.0);
        assert_eq!(start(&mut state), Some(GameEvent::Started));
        assert_eq!(state.phase, GamePhase::Running);
        // Second start is ignored
        assert_eq!(start(&mut state), None);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = running_state();
        assert_eq!(restart(&mut state), None);
        assert_eq!(state.phase, GamePhase::Running);

        let mut fresh = GameState::new(1, Tuning::default(), 800.0, 600.0);
        assert_eq!(restart(&mut fresh), None);
        assert_eq!(fresh.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = running_state();
        let mut spawned = None;
        for i in 1..=120 {
            let events = tick(&mut state, &TickInput::default(), FRAME_MS);
            if events.contains(&GameEvent::ObstaclesSpawned) {
                spawned = Some(i);
                break;
            }
        }
        let at = spawned.expect("a pair should spawn within two seconds");
        assert!((89..=91).contains(&at));
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.spawner.timer_ms, 0.0);
    }

    #[test]
    fn test_obstacles_scroll_at_speed() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(700.0, 560.0), Vec2::new(20.0, 40.0)));
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!((state.obstacles.as_slice()[0].pos.x - 695.0).abs() < 1e-4);
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(152.0, 540.0), Vec2::new(30.0, 60.0)));
        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
        assert_eq!(state.phase, GamePhase::GameOver);

        let x = state.obstacles.as_slice()[0].pos.x;
        let ticks = state.time_ticks;
        assert!(tick(&mut state, &jump(), FRAME_MS).is_empty());
        assert_eq!(state.obstacles.as_slice()[0].pos.x, x);
        assert_eq!(state.time_ticks, ticks);
        assert!(!state.player.jumping, "jump ignored after game over");
    }

    #[test]
    fn test_scoring_and_speed_up_events() {
        let mut state = quiet_state();
        state.score = 4;
        // Already behind the player
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(60.0, 560.0), Vec2::new(20.0, 40.0)));
        let events = tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(
            events,
            vec![GameEvent::Scored { score: 5 }, GameEvent::SpeedUp { speed: 5.5 }]
        );
        assert_eq!(state.speed, 5.5);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(190.0, 520.0), Vec2::new(50.0, 80.0)));
        // Closest approach is 40px (8 ticks at speed 5): jump now
        tick(&mut state, &jump(), FRAME_MS);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_standing_still_collides() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(190.0, 520.0), Vec2::new(50.0, 80.0)));
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_autopilot_clears_tall_obstacle() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(400.0, 520.0), Vec2::new(50.0, 80.0)));
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = running_state();
        while state.phase == GamePhase::Running {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        state.score = 12;
        state.speed = 6.0;
        state.player.vel_y = -3.0;
        state.player.jumping = true;

        assert_eq!(restart(&mut state), Some(GameEvent::Restarted));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, BASE_SPEED);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawner.timer_ms, 0.0);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_X, 520.0));
        assert_eq!(state.player.vel_y, 0.0);
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_resize_reanchors_player_only() {
        let mut state = quiet_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(500.0, 560.0), Vec2::new(20.0, 40.0)));
        tick(&mut state, &jump(), FRAME_MS);
        resize(&mut state, 1024.0, 768.0);
        assert_eq!(state.surface, Vec2::new(1024.0, 768.0));
        assert_eq!(state.player.pos.y, 768.0 - PLAYER_HEIGHT);
        assert!(!state.player.jumping);
        assert_eq!(state.obstacles.as_slice()[0].pos.y, 560.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state();
        let mut b = running_state();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            let ea = tick(&mut a, &input, FRAME_MS);
            let eb = tick(&mut b, &input, FRAME_MS);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.as_slice(), b.obstacles.as_slice());
    }
}
