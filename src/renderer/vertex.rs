//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Arena-space (or NDC, once mapped) corner with a flat color
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.94, 0.94, 0.94, 1.0]; // #f0f0f0
    /// Fallback quads when a sprite image failed to load
    pub const PLAYER_FALLBACK: [f32; 4] = [0.204, 0.596, 0.859, 1.0]; // #3498db
    pub const PROFESSOR_FALLBACK: [f32; 4] = [0.906, 0.298, 0.235, 1.0]; // #e74c3c
    /// Thin frame around blocks so black F blocks stay readable
    pub const BLOCK_EDGE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    /// Terminal overlay dimming
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}
