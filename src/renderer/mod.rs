//! Rendering
//!
//! The scene builder turns game state into draw commands; the pipeline
//! tessellates them into triangles and draws them with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, TextAlign};
pub use vertex::{Color, Vertex};
