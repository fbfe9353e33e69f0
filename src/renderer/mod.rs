//! Rendering boundary
//!
//! The simulation never draws. Each frame a `FrameView` snapshot is taken from
//! the state and `draw_frame` turns it into primitives for any `Renderer`.
//! `MeshRenderer` tessellates those primitives into GPU-ready vertices.

pub mod draw;
pub mod frame;
pub mod mesh;
pub mod noise;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::Rgba;

pub use draw::draw_frame;
pub use frame::{BlobView, BoxView, FrameView, HoleView};
pub use mesh::MeshRenderer;
pub use vertex::Vertex;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Drawing primitives consumed by the frame pass
pub trait Renderer {
    /// Filled polygon from an ordered outline
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    /// Axis-aligned filled rectangle from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Text with its baseline at `pos` (left) or centered on `pos`
    fn text(&mut self, pos: Vec2, text: &str, size: f32, align: TextAlign, color: Rgba);
}

/// Presentation switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub hud: bool,
    /// Full-screen emotion tint
    pub tint: bool,
    /// Upper bound on the outline wobble
    pub max_wobble: Option<f32>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            hud: true,
            tint: true,
            max_wobble: None,
        }
    }
}
