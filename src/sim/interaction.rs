//! Per-tick proximity scans
//!
//! Only the transient `near_blob` / `can_place` flags are written here.

use super::state::GameState;
use crate::distance;

/// Recompute pickup and placement eligibility
pub fn update_interaction_flags(state: &mut GameState) {
    update_pickup_flags(state);
    update_placement_flags(state);
}

/// Flag every free box within reach of the blob
pub fn update_pickup_flags(state: &mut GameState) {
    let reach = state.blob.radius + state.tuning.pickup_reach;
    let center = state.blob.pos;
    for b in state.boxes.iter_mut().filter(|b| !b.held) {
        b.near_blob = distance(center, b.pos) < reach;
    }
}

/// Flag every hole whose aura contains the blob and matches the held color
pub fn update_placement_flags(state: &mut GameState) {
    let Some(held_color) = state.held_box().map(|b| b.color) else {
        for hole in &mut state.holes {
            hole.can_place = false;
        }
        return;
    };
    let center = state.blob.pos;
    for hole in &mut state.holes {
        hole.can_place =
            distance(center, hole.center()) < hole.aura_radius && hole.color == held_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_pickup_reach() {
        let mut state = GameState::new(1);
        // Red box sits at (150, 100); reach is 26 + 30
        state.blob.pos = Vec2::new(150.0 + 55.0, 100.0);
        update_pickup_flags(&mut state);
        assert!(state.boxes[0].near_blob);
        assert!(!state.boxes[1].near_blob);

        state.blob.pos = Vec2::new(150.0 + 56.0, 100.0);
        update_pickup_flags(&mut state);
        assert!(!state.boxes[0].near_blob);
    }

    #[test]
    fn test_placement_requires_holding() {
        let mut state = GameState::new(1);
        state.blob.pos = state.holes[0].center();
        update_placement_flags(&mut state);
        assert!(state.holes.iter().all(|h| !h.can_place));
    }

    #[test]
    fn test_placement_requires_matching_color() {
        let mut state = GameState::new(1);
        state.blob.pos = state.holes[0].center() + Vec2::new(79.0, 0.0);
        state.blob.held_box = Some(1); // green
        state.boxes[1].held = true;
        update_placement_flags(&mut state);
        assert!(!state.holes[0].can_place);

        state.boxes[1].held = false;
        state.blob.held_box = Some(0); // red
        state.boxes[0].held = true;
        update_placement_flags(&mut state);
        assert!(state.holes[0].can_place);
        assert!(!state.holes[1].can_place);
    }
}
