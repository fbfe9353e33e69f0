//! Win detection and full reset

use super::state::{Blob, GameEvent, GameState, Rgba, initial_boxes, initial_holes};

/// Latch victory once every hole is filled
pub fn check_victory(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.victory {
        return;
    }
    if state.holes.iter().all(|h| h.placed_box.is_some()) {
        state.victory = true;
        log::info!("Victory after {} ticks", state.time_ticks);
        events.push(GameEvent::Victory);
    }
}

/// Restore blob, boxes, holes and tint to the starting layout
///
/// The animation phase, tick counter and respawn RNG keep running.
pub fn reset(state: &mut GameState) {
    let phase = state.blob.phase;
    state.blob = Blob::new(state.tuning.blob_radius);
    state.blob.phase = phase;
    state.boxes = initial_boxes();
    state.holes = initial_holes();
    state.tint = Rgba::TRANSPARENT;
    state.victory = false;
    log::info!("Game reset");
}
