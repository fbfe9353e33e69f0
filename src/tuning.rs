//! Data-driven game balance
//!
//! Every gameplay constant that a settings file may override. The defaults
//! reproduce the stock game exactly.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Blob body radius
    pub blob_radius: f32,
    /// Velocity gained per tick of held input
    pub blob_accel: f32,
    /// Velocity multiplier applied every tick (0-1]
    pub blob_friction: f32,
    /// Speed cap before emotion multipliers
    pub blob_max_run: f32,
    /// Extra distance beyond the blob radius at which boxes can be grabbed
    pub pickup_reach: f32,
    /// Emotion duration in ticks
    pub emotion_ticks: u32,
    /// Per-tick multiplier on the screen tint alpha
    pub tint_fade: f32,
    /// Speed of a box sliding off the arena
    pub slide_speed: f32,
    /// Respawn margin inside the platform zone
    pub respawn_inset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            blob_radius: 26.0,
            blob_accel: 0.5,
            blob_friction: 0.92,
            blob_max_run: 3.0,
            pickup_reach: 30.0,
            emotion_ticks: 900, // 15 seconds at 60 Hz
            tint_fade: 0.95,
            slide_speed: 3.0,
            respawn_inset: 50.0,
        }
    }
}

impl Tuning {
    /// Multiplier applied to movement while joyful
    pub const JOY_SPEED: f32 = 1.5;
    /// Multiplier applied to movement while sad
    pub const SADNESS_SPEED: f32 = 0.4;
    /// Multiplier applied to wobble while angry
    pub const ANGER_WOBBLE: f32 = 2.5;

    /// Returns a description of the first out-of-range value, if any
    pub fn check(&self) -> Option<String> {
        use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, EDGE_ZONE};

        if !(self.blob_friction > 0.0 && self.blob_friction <= 1.0) {
            return Some(format!("blob_friction must be in (0, 1], got {}", self.blob_friction));
        }
        if self.blob_accel <= 0.0 {
            return Some(format!("blob_accel must be positive, got {}", self.blob_accel));
        }
        if self.blob_max_run <= 0.0 {
            return Some(format!("blob_max_run must be positive, got {}", self.blob_max_run));
        }
        if self.blob_radius <= 0.0 || self.blob_radius * 2.0 > CANVAS_HEIGHT {
            return Some(format!("blob_radius out of range: {}", self.blob_radius));
        }
        if self.emotion_ticks == 0 {
            return Some("emotion_ticks must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.tint_fade) {
            return Some(format!("tint_fade must be in [0, 1], got {}", self.tint_fade));
        }
        if self.slide_speed <= 0.0 {
            return Some(format!("slide_speed must be positive, got {}", self.slide_speed));
        }
        let inner_w = CANVAS_WIDTH - 2.0 * (EDGE_ZONE + self.respawn_inset);
        let inner_h = CANVAS_HEIGHT - 2.0 * (EDGE_ZONE + self.respawn_inset);
        if self.respawn_inset < 0.0 || inner_w <= 0.0 || inner_h <= 0.0 {
            return Some(format!("respawn_inset leaves no room: {}", self.respawn_inset));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().check(), None);
    }

    #[test]
    fn test_bad_friction_rejected() {
        let tuning = Tuning {
            blob_friction: 1.5,
            ..Default::default()
        };
        assert!(tuning.check().is_some_and(|m| m.contains("blob_friction")));
    }

    #[test]
    fn test_oversized_inset_rejected() {
        let tuning = Tuning {
            respawn_inset: 200.0,
            ..Default::default()
        };
        assert!(tuning.check().is_some());
    }
}
