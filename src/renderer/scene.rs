//! Scene description as an ordered list of draw commands
//!
//! The simulation never draws. Each frame the session turns the game state
//! into [`DrawCommand`]s, in painter's order, and the host executes them.

use glam::Vec2;
use serde::Serialize;

use super::vertex::{Color, colors};
use crate::consts::GROUND_STRIP_HEIGHT;
use crate::score_label;
use crate::settings::Settings;
use crate::sim::{Cloud, GamePhase, GameState, Obstacle, Player};

/// Horizontal anchoring for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing primitive in surface pixel coordinates (y down)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Color },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

impl DrawCommand {
    fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        DrawCommand::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        }
    }

    fn text(text: impl Into<String>, x: f32, y: f32, size: f32, align: TextAlign) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(x, y),
            size,
            align,
            color: colors::TEXT,
        }
    }
}

/// Build the full frame for the current state
pub fn build(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(32 + state.obstacles.len());
    let (w, h) = (state.surface.x, state.surface.y);

    commands.push(DrawCommand::Clear { color: colors::SKY });

    let visible = settings.visible_clouds(state.clouds.len());
    for cloud in state.clouds.iter().take(visible) {
        push_cloud(&mut commands, cloud);
    }

    commands.push(DrawCommand::rect(
        0.0,
        h - GROUND_STRIP_HEIGHT,
        w,
        GROUND_STRIP_HEIGHT,
        colors::GROUND,
    ));

    push_player(&mut commands, &state.player);
    for obstacle in &state.obstacles {
        push_obstacle(&mut commands, obstacle);
    }

    commands.push(DrawCommand::text(
        score_label(state.score),
        20.0,
        40.0,
        24.0,
        TextAlign::Left,
    ));

    match state.phase {
        GamePhase::NotStarted => {
            commands.push(DrawCommand::rect(0.0, 0.0, w, h, colors::OVERLAY));
            commands.push(DrawCommand::text(
                "Hat Runner",
                w / 2.0,
                h / 2.0 - 50.0,
                48.0,
                TextAlign::Center,
            ));
            commands.push(DrawCommand::text(
                "Click Start to play",
                w / 2.0,
                h / 2.0,
                24.0,
                TextAlign::Center,
            ));
        }
        GamePhase::GameOver => {
            commands.push(DrawCommand::rect(0.0, 0.0, w, h, colors::OVERLAY));
            commands.push(DrawCommand::text(
                "Game Over!",
                w / 2.0,
                h / 2.0 - 50.0,
                48.0,
                TextAlign::Center,
            ));
            commands.push(DrawCommand::text(
                format!("Final Score: {}", state.score),
                w / 2.0,
                h / 2.0,
                24.0,
                TextAlign::Center,
            ));
            commands.push(DrawCommand::text(
                "Press R to restart",
                w / 2.0,
                h / 2.0 + 50.0,
                24.0,
                TextAlign::Center,
            ));
        }
        GamePhase::Running => {}
    }

    commands
}

/// Three overlapping puffs
fn push_cloud(commands: &mut Vec<DrawCommand>, cloud: &Cloud) {
    let Cloud { pos, width, .. } = *cloud;
    for (offset, radius) in [
        (Vec2::ZERO, width / 3.0),
        (Vec2::new(width / 3.0, -10.0), width / 4.0),
        (Vec2::new(width / 2.0, 0.0), width / 3.0),
    ] {
        commands.push(DrawCommand::Circle {
            center: pos + offset,
            radius,
            color: colors::CLOUD,
        });
    }
}

/// Body, two eyes and a hat
fn push_player(commands: &mut Vec<DrawCommand>, player: &Player) {
    let (p, s) = (player.pos, player.size);
    commands.push(DrawCommand::rect(p.x, p.y, s.x, s.y, colors::PLAYER));
    commands.push(DrawCommand::rect(p.x + 10.0, p.y + 15.0, 10.0, 10.0, colors::EYE));
    commands.push(DrawCommand::rect(p.x + 30.0, p.y + 15.0, 10.0, 10.0, colors::EYE));
    commands.push(DrawCommand::rect(p.x - 5.0, p.y - 20.0, s.x + 10.0, 20.0, colors::HAT));
}

fn push_obstacle(commands: &mut Vec<DrawCommand>, obstacle: &Obstacle) {
    commands.push(DrawCommand::Rect {
        pos: obstacle.pos,
        size: obstacle.size,
        color: colors::OBSTACLE,
    });
}

/// Text lines of a frame, top to bottom, for hosts that draw text themselves
pub fn text_lines(commands: &[DrawCommand]) -> impl Iterator<Item = &str> {
    commands.iter().filter_map(|c| match c {
        DrawCommand::Text { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, TickInput, start, tick};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(3, Tuning::default(), 800.0, 600.0)
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let commands = build(&state(), &Settings::default());
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_start_overlay() {
        let commands = build(&state(), &Settings::default());
        let lines: Vec<&str> = text_lines(&commands).collect();
        assert_eq!(lines, vec!["Score: 0", "Hat Runner", "Click Start to play"]);
    }

    #[test]
    fn test_running_has_no_overlay() {
        let mut s = state();
        start(&mut s);
        let commands = build(&s, &Settings::default());
        let lines: Vec<&str> = text_lines(&commands).collect();
        assert_eq!(lines, vec!["Score: 0"]);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut s = state();
        start(&mut s);
        let mut events = Vec::new();
        while s.phase == GamePhase::Running {
            events.extend(tick(&mut s, &TickInput::default(), crate::consts::FRAME_MS));
        }
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));

        let commands = build(&s, &Settings::default());
        let lines: Vec<&str> = text_lines(&commands).collect();
        assert_eq!(
            lines,
            vec!["Score: 0", "Game Over!", "Final Score: 0", "Press R to restart"]
        );
    }

    #[test]
    fn test_player_is_drawn_with_hat() {
        let commands = build(&state(), &Settings::default());
        assert!(commands.contains(&DrawCommand::Rect {
            pos: Vec2::new(95.0, 500.0),
            size: Vec2::new(60.0, 20.0),
            color: colors::HAT,
        }));
    }

    #[test]
    fn test_clouds_follow_settings() {
        let s = state();
        let circles = |settings: &Settings| {
            build(&s, settings)
                .iter()
                .filter(|c| matches!(c, DrawCommand::Circle { .. }))
                .count()
        };
        assert_eq!(circles(&Settings::default()), 15);
        let off = Settings {
            clouds: false,
            ..Default::default()
        };
        assert_eq!(circles(&off), 0);
    }

    #[test]
    fn test_obstacles_drawn_in_spawn_order() {
        let mut s = state();
        s.obstacles.push(Obstacle::new(Vec2::new(300.0, 560.0), Vec2::new(20.0, 40.0)));
        s.obstacles.push(Obstacle::new(Vec2::new(500.0, 550.0), Vec2::new(20.0, 50.0)));
        let xs: Vec<f32> = build(&s, &Settings::default())
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { pos, color, .. } if *color == colors::OBSTACLE => Some(pos.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![300.0, 500.0]);
    }
}
