//! Per-frame snapshot handed to the renderer

use glam::Vec2;

use crate::sim::{BoxColor, Emotion, GameState, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub struct BlobView {
    pub pos: Vec2,
    pub radius: f32,
    pub points: u32,
    pub wobble: f32,
    pub phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxView {
    /// Center
    pub pos: Vec2,
    pub color: BoxColor,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoleView {
    pub center: Vec2,
    pub aura_radius: f32,
    pub color: BoxColor,
}

/// Everything visible this frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub blob: BlobView,
    /// Boxes on the floor, in holes or sliding (held box excluded)
    pub boxes: Vec<BoxView>,
    pub holes: Vec<HoleView>,
    pub held: Option<BoxColor>,
    pub emotions: Vec<Emotion>,
    pub victory: bool,
    pub tint: Rgba,
}

impl FrameView {
    pub fn from_state(state: &GameState) -> Self {
        let blob = &state.blob;
        Self {
            blob: BlobView {
                pos: blob.pos,
                radius: blob.radius,
                points: blob.points,
                wobble: blob.wobble,
                phase: blob.phase,
            },
            boxes: state
                .boxes
                .iter()
                .filter(|b| !b.held)
                .map(|b| BoxView {
                    pos: b.pos,
                    color: b.color,
                    size: b.size,
                })
                .collect(),
            holes: state
                .holes
                .iter()
                .map(|h| HoleView {
                    center: h.center(),
                    aura_radius: h.aura_radius,
                    color: h.color,
                })
                .collect(),
            held: state.held_box().map(|b| b.color),
            emotions: blob.emotions.active().map(|(e, _)| e).collect(),
            victory: state.victory,
            tint: state.tint,
        }
    }

    /// Comma separated emotion names, or "neutral"
    pub fn emotion_list(&self) -> String {
        if self.emotions.is_empty() {
            return "neutral".to_string();
        }
        self.emotions
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Move: WASD or Arrows • E: Pick up • Q: Drop • Emotions: {}",
            self.emotion_list()
        )];
        if let Some(color) = self.held {
            lines.push(format!("Holding: {} box", color.name()));
        }
        lines
    }
}
