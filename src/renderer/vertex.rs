//! Vertex format and palette
//!
//! Positions are logical pixels inside a `VertexBatch` and NDC once uploaded.

use bytemuck::{Pod, Zeroable};

/// Flat-colored 2D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `shader.wgsl`
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Scene palette (linear RGBA)
pub mod colors {
    pub const GROUND: [f32; 4] = [0.87, 0.84, 0.58, 1.0];
    pub const GRASS: [f32; 4] = [0.45, 0.75, 0.30, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.35, 0.70, 0.25, 1.0];
    pub const OBSTACLE_LIP: [f32; 4] = [0.25, 0.55, 0.18, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.75];
    pub const HILL: [f32; 4] = [0.55, 0.78, 0.55, 0.9];
    pub const ENTITY: [f32; 4] = [0.98, 0.80, 0.20, 1.0];
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const BEAK: [f32; 4] = [0.95, 0.45, 0.15, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HINT: [f32; 4] = [1.0, 0.95, 0.85, 1.0];
}
