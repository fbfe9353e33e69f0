//! Emotion effects
//!
//! Seating a box activates its color's emotion for a fixed number of ticks.
//! Each active emotion is owned by at most one hole; when the emotion ends
//! while that hole is occupied, the occupant slides off the arena.

use super::lifecycle::expel;
use super::state::{Emotion, GameEvent, GameState};
use crate::consts::{BLOB_POINTS, BLOB_POINTS_SAD};

/// Start (or refresh) an emotion and bind it to `hole_index`
pub fn activate(
    state: &mut GameState,
    emotion: Emotion,
    hole_index: usize,
    events: &mut Vec<GameEvent>,
) {
    // Another hole may still claim this emotion; release it first
    if let Some(other) = state
        .hole_with_emotion(emotion)
        .filter(|&h| h != hole_index)
    {
        release_hole(state, other, events);
    }

    let ticks = state.tuning.emotion_ticks;
    state.blob.emotions.set(emotion, ticks);
    state.tint = emotion.tint();
    if emotion == Emotion::Sadness {
        state.blob.points = BLOB_POINTS_SAD;
    }
    state.holes[hole_index].emotion = Some(emotion);

    log::debug!("{} active for {} ticks (hole {})", emotion.name(), ticks, hole_index);
    events.push(GameEvent::EmotionActivated(emotion));
}

/// End an emotion, expelling the box of the hole that owned it
pub fn deactivate(state: &mut GameState, emotion: Emotion, events: &mut Vec<GameEvent>) {
    let was_active = state.blob.emotions.clear(emotion);

    if let Some(hole_index) = state.hole_with_emotion(emotion) {
        release_hole(state, hole_index, events);
    }

    if emotion == Emotion::Sadness && !state.blob.emotions.is_active(Emotion::Sadness) {
        state.blob.points = BLOB_POINTS;
    }

    if was_active {
        log::debug!("{} ended", emotion.name());
        events.push(GameEvent::EmotionEnded(emotion));
    }
}

/// Clear a hole's binding and send its occupant sliding
fn release_hole(state: &mut GameState, hole_index: usize, events: &mut Vec<GameEvent>) {
    let hole = &mut state.holes[hole_index];
    hole.emotion = None;
    if let Some(box_index) = hole.placed_box.take() {
        expel(state, box_index, events);
    }
}

/// Count every active emotion down by one tick
pub fn tick_emotions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for emotion in Emotion::ALL {
        match state.blob.emotions.get(emotion) {
            Some(t) if t <= 1 => deactivate(state, emotion, events),
            Some(t) => state.blob.emotions.set(emotion, t - 1),
            None => {}
        }
    }
}

/// Fade the screen tint (alpha only)
///
/// Alpha decays geometrically by `tint_fade`. Below 0.01 it is snapped to 0 as
/// a render cutoff, so the draw pass can skip the tint rect entirely.
pub fn fade_tint(state: &mut GameState) {
    state.tint.a *= state.tuning.tint_fade;
    if state.tint.a < 0.01 {
        state.tint.a = 0.0;
    }
}
