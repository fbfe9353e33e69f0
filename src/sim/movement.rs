//! Blob movement integration
//!
//! Input intent plus the active emotion modifiers become velocity, then
//! position. The blob is kept fully inside the canvas.

use glam::Vec2;

use super::state::{Emotion, EmotionTimers, GameState};
use crate::consts::{BLOB_WOBBLE, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::tuning::Tuning;

/// Held directional keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Directions {
    pub fn inverted(self) -> Self {
        Self {
            left: !self.left,
            right: !self.right,
            up: !self.up,
            down: !self.down,
        }
    }

    /// Combine into per-axis intent in {-1, 0, 1}
    pub fn axis(self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        v
    }
}

/// Multipliers derived from the active emotions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    pub speed: f32,
    pub wobble: f32,
    pub inverted: bool,
}

impl Modifiers {
    pub fn from_emotions(emotions: &EmotionTimers) -> Self {
        let mut speed = 1.0;
        let mut wobble = 1.0;
        // Multipliers stack; joy and sadness together give 0.6
        if emotions.is_active(Emotion::Joy) {
            speed *= Tuning::JOY_SPEED;
        }
        if emotions.is_active(Emotion::Sadness) {
            speed *= Tuning::SADNESS_SPEED;
        }
        if emotions.is_active(Emotion::Anger) {
            wobble *= Tuning::ANGER_WOBBLE;
        }
        Self {
            speed,
            wobble,
            inverted: emotions.is_active(Emotion::Nausea),
        }
    }
}

/// Advance the blob by one tick and drag the held box along
pub fn integrate_blob(state: &mut GameState, dirs: Directions) {
    let tuning = &state.tuning;
    let blob = &mut state.blob;
    let mods = Modifiers::from_emotions(&blob.emotions);

    let dirs = if mods.inverted { dirs.inverted() } else { dirs };
    let intent = dirs.axis();

    blob.vel += intent * tuning.blob_accel * mods.speed;
    blob.vel *= tuning.blob_friction;

    let cap = tuning.blob_max_run * mods.speed;
    let speed = blob.vel.length();
    if speed > cap {
        blob.vel = blob.vel / speed * cap;
    }

    blob.pos += blob.vel;
    blob.pos.x = blob.pos.x.clamp(blob.radius, CANVAS_WIDTH - blob.radius);
    blob.pos.y = blob.pos.y.clamp(blob.radius, CANVAS_HEIGHT - blob.radius);

    blob.wobble = BLOB_WOBBLE * mods.wobble;

    if let Some(i) = blob.held_box {
        state.boxes[i].pos = blob.pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn right() -> Directions {
        Directions {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_accelerates_and_caps_speed() {
        let mut state = GameState::new(1);
        integrate_blob(&mut state, right());
        // (0 + 0.5) * 0.92
        assert!((state.blob.vel.x - 0.46).abs() < 1e-6);

        for _ in 0..60 {
            integrate_blob(&mut state, right());
        }
        assert!((state.blob.vel.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_emotion_factors() {
        let mut timers = EmotionTimers::default();
        timers.set(Emotion::Joy, 10);
        assert_eq!(Modifiers::from_emotions(&timers).speed, 1.5);

        let mut timers = EmotionTimers::default();
        timers.set(Emotion::Sadness, 10);
        assert_eq!(Modifiers::from_emotions(&timers).speed, 0.4);
    }

    #[test]
    fn test_joy_raises_speed_cap() {
        let mut state = GameState::new(1);
        state.blob.emotions.set(Emotion::Joy, 900);
        integrate_blob(&mut state, right());
        // (0 + 0.5 * 1.5) * 0.92
        assert!((state.blob.vel.x - 0.69).abs() < 1e-6);

        for _ in 0..60 {
            integrate_blob(&mut state, right());
        }
        assert!((state.blob.vel.x - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_joy_and_sadness_stack() {
        let mut timers = EmotionTimers::default();
        timers.set(Emotion::Joy, 10);
        timers.set(Emotion::Sadness, 10);
        let mods = Modifiers::from_emotions(&timers);
        assert!((mods.speed - 0.6).abs() < 1e-6);
        assert_eq!(mods.wobble, 1.0);
    }

    #[test]
    fn test_sadness_caps_speed() {
        let mut state = GameState::new(1);
        state.blob.emotions.set(Emotion::Sadness, 900);
        for _ in 0..100 {
            integrate_blob(&mut state, right());
        }
        assert!(state.blob.vel.length() <= 1.2 + 1e-4);
    }

    #[test]
    fn test_nausea_inverts_controls() {
        let mut state = GameState::new(1);
        state.blob.emotions.set(Emotion::Nausea, 900);
        integrate_blob(&mut state, right());
        assert!(state.blob.vel.x < 0.0);
        assert_eq!(state.blob.vel.y, 0.0);

        // No keys inverts to all keys, which cancels out
        let mut idle = GameState::new(1);
        idle.blob.emotions.set(Emotion::Nausea, 900);
        integrate_blob(&mut idle, Directions::default());
        assert_eq!(idle.blob.vel, Vec2::ZERO);
    }

    #[test]
    fn test_anger_wobble() {
        let mut state = GameState::new(1);
        state.blob.emotions.set(Emotion::Anger, 900);
        integrate_blob(&mut state, Directions::default());
        assert!((state.blob.wobble - 17.5).abs() < 1e-6);
        state.blob.emotions.clear(Emotion::Anger);
        integrate_blob(&mut state, Directions::default());
        assert_eq!(state.blob.wobble, 7.0);
    }

    #[test]
    fn test_clamped_to_canvas() {
        let mut state = GameState::new(1);
        let left = Directions {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..400 {
            integrate_blob(&mut state, left);
        }
        assert_eq!(state.blob.pos, Vec2::new(26.0, 26.0));
    }

    #[test]
    fn test_held_box_follows_blob() {
        let mut state = GameState::new(1);
        state.blob.held_box = Some(2);
        state.boxes[2].held = true;
        integrate_blob(&mut state, right());
        assert_eq!(state.boxes[2].pos, state.blob.pos);
    }

    proptest! {
        #[test]
        fn prop_friction_decays_without_input(vx in -3.0f32..3.0, vy in -3.0f32..3.0) {
            prop_assume!(vx.abs() > 0.01 || vy.abs() > 0.01);
            let mut state = GameState::new(1);
            // Start at the center so the wall clamp never interferes
            state.blob.vel = Vec2::new(vx, vy);
            let mut last = state.blob.vel;
            for _ in 0..30 {
                integrate_blob(&mut state, Directions::default());
                let v = state.blob.vel;
                prop_assert!(v.length() < last.length());
                prop_assert!(v.x * last.x >= 0.0 && v.y * last.y >= 0.0);
                last = v;
            }
        }
    }
}
