//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

    /// Bytes per vertex (position at offset 0, color at offset 8)
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    use crate::sim::Rgba;

    pub const BACKGROUND: Rgba = Rgba::gray(240.0, 255.0);
    pub const EDGE_ZONE: Rgba = Rgba::gray(200.0, 100.0);
    pub const BLOB: Rgba = Rgba::rgb(20.0, 120.0, 255.0);
    pub const BOX_OUTLINE: Rgba = Rgba::gray(0.0, 255.0);
    pub const HUD_TEXT: Rgba = Rgba::gray(0.0, 255.0);
    pub const VICTORY_OVERLAY: Rgba = Rgba::gray(0.0, 180.0);
    pub const VICTORY_TEXT: Rgba = Rgba::rgb(255.0, 255.0, 0.0);
    pub const RESTART_PANEL: Rgba = Rgba::rgb(100.0, 200.0, 100.0);
    pub const RESTART_TEXT: Rgba = Rgba::gray(255.0, 255.0);
}

/// Raw bytes of a vertex list, ready for a GPU buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
