//! Vertex and color types for the triangle pipeline

use bytemuck::{Pod, Zeroable};

/// sRGB-encoded RGBA, as written in CSS
pub type Color = [f32; 4];

/// 2D vertex in surface pixels with a flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert a `0xRRGGBB` literal plus alpha
pub const fn hex(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Decode the color channels to linear light for an sRGB render target.
/// Alpha is left as is.
pub fn to_linear(color: Color) -> Color {
    fn channel(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [channel(color[0]), channel(color[1]), channel(color[2]), color[3]]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, hex};

    pub const SKY: Color = hex(0x87CEEB, 1.0);
    pub const CLOUD: Color = [1.0, 1.0, 1.0, 0.8];
    pub const GROUND: Color = hex(0x8BC34A, 1.0);
    pub const PLAYER: Color = hex(0xFF5252, 1.0);
    pub const EYE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HAT: Color = hex(0xFF0000, 1.0);
    pub const OBSTACLE: Color = hex(0x4CAF50, 1.0);
    /// Dimming panel behind the start and game-over text
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.7];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x000000, 0.5), [0.0, 0.0, 0.0, 0.5]);
        let green = colors::OBSTACLE;
        assert!((green[1] - 175.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_linear() {
        assert_eq!(to_linear([0.0, 1.0, 0.0, 0.7]), [0.0, 1.0, 0.0, 0.7]);
        let mid = to_linear([0.5, 0.5, 0.5, 1.0]);
        assert!((mid[0] - 0.214).abs() < 1e-3);
        // Obstacle green darkens once decoded
        let green = to_linear(colors::OBSTACLE);
        assert!(green[1] < colors::OBSTACLE[1]);
        assert!((green[1] - 0.4287).abs() < 1e-3);
    }

    #[test]
    fn test_vertex_layout_matches_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
