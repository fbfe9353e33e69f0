//! CPU tessellating renderer
//!
//! Collects one frame of primitives into a triangle list that a GPU backend
//! can upload as-is. Text cannot be tessellated here, so it is queued as runs
//! for a glyph pass.

use glam::Vec2;

use super::shapes;
use super::vertex::{self, Vertex};
use super::{Renderer, TextAlign};
use crate::sim::Rgba;

/// Text queued for the glyph pass
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub align: TextAlign,
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct MeshRenderer {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
    /// Segments per filled circle
    pub circle_segments: u32,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            texts: Vec::new(),
            circle_segments: 32,
        }
    }
}

impl MeshRenderer {
    /// Start a new frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }
}

impl Renderer for MeshRenderer {
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::polygon_fan(points, color.to_unit()));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::rect(min, size, color.to_unit()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if color.a <= 0.0 || radius <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::circle(
            center,
            radius,
            color.to_unit(),
            self.circle_segments,
        ));
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, align: TextAlign, color: Rgba) {
        self.texts.push(TextRun {
            pos,
            text: text.to_string(),
            size,
            align,
            color: color.to_unit(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawOptions, FrameView, draw_frame};
    use crate::sim::GameState;

    #[test]
    fn test_transparent_primitives_skipped() {
        let mut mesh = MeshRenderer::default();
        mesh.fill_rect(Vec2::ZERO, Vec2::ONE, Rgba::TRANSPARENT);
        mesh.fill_circle(Vec2::ZERO, 4.0, Rgba::gray(0.0, 0.0));
        assert!(mesh.vertices.is_empty());
        mesh.fill_circle(Vec2::ZERO, 4.0, Rgba::gray(0.0, 10.0));
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn test_frame_tessellation() {
        let state = GameState::new(1);
        let mut mesh = MeshRenderer::default();
        draw_frame(&FrameView::from_state(&state), &DrawOptions::default(), &mut mesh);

        // The outermost aura ring has alpha 0 and is skipped: 4 holes x 15 rings
        let circles = 4 * 15 * 32;
        let rects = 13 * 2;
        let blob = 48;
        assert_eq!(mesh.triangle_count(), circles + rects + blob);
        assert_eq!(mesh.texts.len(), 1);
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * Vertex::STRIDE);

        mesh.clear();
        assert!(mesh.vertices.is_empty() && mesh.texts.is_empty());
    }
}
