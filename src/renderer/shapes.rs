//! Triangle generation for draw commands

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::DrawCommand;
use super::vertex::{Color, Vertex};

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let max = pos + size;
    [
        Vertex::new(pos.x, pos.y, color),
        Vertex::new(max.x, pos.y, color),
        Vertex::new(pos.x, max.y, color),
        Vertex::new(pos.x, max.y, color),
        Vertex::new(max.x, pos.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Flatten a frame into a triangle list in draw order.
///
/// `Clear` becomes the render pass load color and `Text` is left to the host,
/// so neither produces geometry.
pub fn tessellate(commands: &[DrawCommand], circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for command in commands {
        match command {
            DrawCommand::Rect { pos, size, color } => {
                vertices.extend_from_slice(&rect(*pos, *size, *color));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, circle_segments)),
            DrawCommand::Clear { .. } | DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

/// Background color of a frame, if it has one
pub fn clear_color(commands: &[DrawCommand]) -> Option<Color> {
    commands.iter().find_map(|c| match c {
        DrawCommand::Clear { color } => Some(*color),
        _ => None,
    })
}
