//! Box lifecycle: pickup, drop, expulsion and respawn
//!
//! free -> held -> placed -> sliding -> free. Pickup and drop are discrete
//! actions; sliding is integrated every tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::emotion;
use super::state::{GameEvent, GameState};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, EDGE_ZONE};
use crate::tuning::Tuning;

/// Grab the first reachable box. Returns true if a box was picked up.
pub fn try_pickup(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.blob.held_box.is_some() {
        return false;
    }
    let Some(box_index) = state
        .boxes
        .iter()
        .position(|b| b.near_blob && !b.held && !b.sliding)
    else {
        return false;
    };

    // Taking a seated box ends its emotion without expelling it
    if let Some(hole_index) = state.hole_of(box_index) {
        state.holes[hole_index].placed_box = None;
        if let Some(e) = state.holes[hole_index].emotion {
            emotion::deactivate(state, e, events);
        }
    }

    let b = &mut state.boxes[box_index];
    b.held = true;
    b.pos = state.blob.pos;
    state.blob.held_box = Some(box_index);

    log::debug!("picked up {} box", b.color.name());
    events.push(GameEvent::PickedUp { box_index });
    true
}

/// Seat the held box in an eligible hole, or put it on the floor.
/// Returns true if the blob was holding something.
pub fn try_drop(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let Some(box_index) = state.blob.held_box else {
        return false;
    };
    let color = state.boxes[box_index].color;

    state.boxes[box_index].held = false;
    state.blob.held_box = None;

    let target = state
        .holes
        .iter()
        .position(|h| h.can_place && h.color == color);

    let Some(hole_index) = target else {
        log::debug!("dropped {} box on the floor", color.name());
        events.push(GameEvent::GroundDropped { box_index });
        return true;
    };

    // A previous occupant loses its emotion (and slides off) first
    if state.holes[hole_index]
        .placed_box
        .is_some_and(|prev| prev != box_index)
    {
        match state.holes[hole_index].emotion {
            Some(e) => emotion::deactivate(state, e, events),
            None => state.holes[hole_index].placed_box = None,
        }
    }

    state.holes[hole_index].placed_box = Some(box_index);
    emotion::activate(state, color.emotion(), hole_index, events);

    log::debug!("placed {} box in hole {}", color.name(), hole_index);
    events.push(GameEvent::Placed {
        box_index,
        hole_index,
    });
    true
}

/// Send a box sliding toward the nearest canvas edge
pub fn expel(state: &mut GameState, box_index: usize, events: &mut Vec<GameEvent>) {
    let speed = state.tuning.slide_speed;
    let b = &mut state.boxes[box_index];
    debug_assert!(!b.held, "expelling a held box");

    b.sliding = true;
    b.vel = nearest_edge_direction(b.pos) * speed;

    log::debug!("{} box slides off toward {:?}", b.color.name(), b.vel);
    events.push(GameEvent::Expelled { box_index });
}

/// Unit axis toward the closest edge; ties resolve left, right, top, bottom
pub fn nearest_edge_direction(pos: Vec2) -> Vec2 {
    let left = pos.x;
    let right = CANVAS_WIDTH - pos.x;
    let top = pos.y;
    let bottom = CANVAS_HEIGHT - pos.y;
    let min = left.min(right).min(top).min(bottom);

    if min == left {
        Vec2::NEG_X
    } else if min == right {
        Vec2::X
    } else if min == top {
        Vec2::NEG_Y
    } else {
        Vec2::Y
    }
}

/// Move sliding boxes; respawn the ones that left the canvas
pub fn update_sliding(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for (box_index, b) in state.boxes.iter_mut().enumerate() {
        if !b.sliding {
            continue;
        }
        b.pos += b.vel;

        let gone = b.pos.x < -b.size
            || b.pos.x > CANVAS_WIDTH + b.size
            || b.pos.y < -b.size
            || b.pos.y > CANVAS_HEIGHT + b.size;
        if gone {
            b.pos = respawn_position(&mut state.rng, &state.tuning);
            b.sliding = false;
            b.vel = Vec2::ZERO;

            log::debug!("{} box respawned at {:?}", b.color.name(), b.pos);
            events.push(GameEvent::Respawned { box_index });
        }
    }
}

/// Uniform position inside the inset platform zone
pub fn respawn_position(rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let min = EDGE_ZONE + tuning.respawn_inset;
    let max_x = CANVAS_WIDTH - EDGE_ZONE - tuning.respawn_inset;
    let max_y = CANVAS_HEIGHT - EDGE_ZONE - tuning.respawn_inset;
    Vec2::new(rng.random_range(min..=max_x), rng.random_range(min..=max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::interaction::update_interaction_flags;
    use crate::sim::state::{BoxState, Emotion};
    use rand::SeedableRng;

    /// Put the blob on top of box `i` and pick it up
    fn grab(state: &mut GameState, i: usize, events: &mut Vec<GameEvent>) {
        state.blob.pos = state.boxes[i].pos;
        update_interaction_flags(state);
        assert!(try_pickup(state, events));
    }

    /// Carry the held box into its hole and drop it
    fn place(state: &mut GameState, hole: usize, events: &mut Vec<GameEvent>) {
        state.blob.pos = state.holes[hole].center();
        if let Some(i) = state.blob.held_box {
            state.boxes[i].pos = state.blob.pos;
        }
        update_interaction_flags(state);
        assert!(try_drop(state, events));
    }

    #[test]
    fn test_pickup_adjacent_box() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        state.blob.pos = Vec2::new(150.0 + 40.0, 100.0);
        update_interaction_flags(&mut state);
        assert!(try_pickup(&mut state, &mut events));
        assert_eq!(state.blob.held_box, Some(0));
        assert!(state.boxes[0].held);
        assert_eq!(events, vec![GameEvent::PickedUp { box_index: 0 }]);
    }

    #[test]
    fn test_pickup_nothing_nearby_is_noop() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        update_interaction_flags(&mut state);
        assert!(!try_pickup(&mut state, &mut events));
        assert!(events.is_empty());
        assert!(state.blob.held_box.is_none());
    }

    #[test]
    fn test_pickup_ignores_sliding_boxes() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        state.boxes[0].sliding = true;
        state.blob.pos = state.boxes[0].pos;
        update_interaction_flags(&mut state);
        assert!(!try_pickup(&mut state, &mut events));
    }

    #[test]
    fn test_drop_in_matching_hole() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grab(&mut state, 0, &mut events);
        // 70 units from the red hole center, inside the 80 aura
        state.blob.pos = state.holes[0].center() + Vec2::new(70.0, 0.0);
        update_interaction_flags(&mut state);
        assert!(state.holes[0].can_place);
        assert!(try_drop(&mut state, &mut events));

        assert_eq!(state.holes[0].placed_box, Some(0));
        assert_eq!(state.blob.emotions.get(Emotion::Anger), Some(900));
        assert!(state.blob.held_box.is_none());
        assert!(!state.boxes[0].held);
        assert_eq!(state.invariant_violation(), None);
    }

    #[test]
    fn test_drop_outside_aura_is_ground_drop() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grab(&mut state, 1, &mut events);
        let spot = state.blob.pos;
        update_interaction_flags(&mut state);
        assert!(try_drop(&mut state, &mut events));
        assert_eq!(state.box_state(1), BoxState::Free);
        assert_eq!(state.boxes[1].pos, spot);
        assert!(state.blob.emotions.is_empty());
        assert!(events.contains(&GameEvent::GroundDropped { box_index: 1 }));
    }

    #[test]
    fn test_drop_wrong_color_is_ground_drop() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grab(&mut state, 1, &mut events); // green
        state.blob.pos = state.holes[0].center(); // red hole
        update_interaction_flags(&mut state);
        assert!(try_drop(&mut state, &mut events));
        assert!(state.holes[0].placed_box.is_none());
        assert!(state.blob.emotions.is_empty());
    }

    #[test]
    fn test_pickup_from_hole_ends_emotion_without_expelling() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        grab(&mut state, 2, &mut events);
        place(&mut state, 2, &mut events);
        assert_eq!(state.blob.points, 12);

        grab(&mut state, 2, &mut events);
        assert_eq!(state.blob.held_box, Some(2));
        assert!(!state.blob.emotions.is_active(Emotion::Sadness));
        assert_eq!(state.blob.points, 48);
        assert!(state.holes[2].placed_box.is_none());
        assert!(state.holes[2].emotion.is_none());
        assert!(!state.boxes[2].sliding);
        assert_eq!(state.invariant_violation(), None);
    }

    #[test]
    fn test_pickup_prefers_lowest_index() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        state.boxes[3].pos = state.boxes[0].pos + Vec2::new(5.0, 0.0);
        grab(&mut state, 0, &mut events);
        assert_eq!(state.blob.held_box, Some(0));
    }

    #[test]
    fn test_nearest_edge_direction() {
        assert_eq!(nearest_edge_direction(Vec2::new(10.0, 180.0)), Vec2::NEG_X);
        assert_eq!(nearest_edge_direction(Vec2::new(630.0, 180.0)), Vec2::X);
        assert_eq!(nearest_edge_direction(Vec2::new(320.0, 5.0)), Vec2::NEG_Y);
        assert_eq!(nearest_edge_direction(Vec2::new(320.0, 350.0)), Vec2::Y);
        // Left wins every tie
        assert_eq!(nearest_edge_direction(Vec2::new(20.0, 20.0)), Vec2::NEG_X);
        assert_eq!(nearest_edge_direction(Vec2::new(320.0, 340.0)), Vec2::Y);
    }

    #[test]
    fn test_expel_then_respawn() {
        let mut state = GameState::new(7);
        let mut events = Vec::new();
        // Red box at (150, 100): the top edge is closest
        expel(&mut state, 0, &mut events);
        assert!(state.boxes[0].sliding);
        assert_eq!(state.boxes[0].vel, Vec2::new(0.0, -3.0));

        let mut ticks = 0;
        while state.boxes[0].sliding {
            update_sliding(&mut state, &mut events);
            ticks += 1;
            assert!(ticks < 100, "box never left the canvas");
        }
        // 100 -> below -30 at 3 per tick
        assert_eq!(ticks, 44);
        let b = &state.boxes[0];
        assert_eq!(b.vel, Vec2::ZERO);
        assert!((80.0..=560.0).contains(&b.pos.x));
        assert!((80.0..=280.0).contains(&b.pos.y));
        assert!(events.contains(&GameEvent::Respawned { box_index: 0 }));
    }

    #[test]
    fn test_respawn_stays_in_platform() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            let p = respawn_position(&mut rng, &tuning);
            assert!((80.0..=560.0).contains(&p.x));
            assert!((80.0..=280.0).contains(&p.y));
        }
    }
}
