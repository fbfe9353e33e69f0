//! Idle/demo mode - the blob plays the game by itself
//!
//! Walks to the nearest free box, carries it to the matching hole and drops
//! it. Sadness is saved for last since it slows everything down. The plan is a
//! pure function of the state, so demo runs stay deterministic.

use glam::Vec2;

use super::state::{BoxColor, BoxState, Emotion, GameState};
use super::tick::TickInput;
use crate::distance;

/// Safety margin so one tick of drift cannot change the outcome of an action
const ARRIVE_MARGIN: f32 = 5.0;
/// Axis distance below which the autopilot stops pushing
const DEADZONE: f32 = 2.0;

/// Decide the input for the next tick
pub fn plan(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    if state.victory {
        input.restart = true;
        return input;
    }

    let blob = &state.blob;

    if let Some(held) = blob.held_box {
        let color = state.boxes[held].color;
        let Some(hole) = state.holes.iter().find(|h| h.color == color) else {
            return input;
        };
        let center = hole.center();
        if distance(blob.pos, center) < hole.aura_radius - ARRIVE_MARGIN {
            input.drop = true;
        } else {
            steer(&mut input, state, center);
        }
        return input;
    }

    let Some(target) = choose_target(state) else {
        return input;
    };
    let target_pos = state.boxes[target].pos;
    let reach = blob.radius + state.tuning.pickup_reach;
    let in_reach = distance(blob.pos, target_pos) < reach - ARRIVE_MARGIN;
    if in_reach && pickup_is_safe(state, target, reach) {
        input.pickup = true;
    } else {
        steer(&mut input, state, target_pos);
    }
    input
}

/// Nearest free box, leaving blue (sadness) until nothing else is free
fn choose_target(state: &GameState) -> Option<usize> {
    let pos = state.blob.pos;
    (0..state.boxes.len())
        .filter(|&i| state.box_state(i) == BoxState::Free)
        .min_by(|&a, &b| {
            let key = |i: usize| {
                (
                    state.boxes[i].color == BoxColor::Blue,
                    distance(pos, state.boxes[i].pos),
                )
            };
            let (blue_a, dist_a) = key(a);
            let (blue_b, dist_b) = key(b);
            blue_a
                .cmp(&blue_b)
                .then(dist_a.partial_cmp(&dist_b).unwrap_or(std::cmp::Ordering::Equal))
        })
}

/// Pickup takes the lowest reachable index, which must not be a seated box
fn pickup_is_safe(state: &GameState, target: usize, reach: f32) -> bool {
    (0..target).all(|i| {
        let b = &state.boxes[i];
        b.sliding
            || distance(state.blob.pos, b.pos) >= reach + ARRIVE_MARGIN
            || state.box_state(i) == BoxState::Free
    })
}

/// Press the keys that move the blob toward `target`
fn steer(input: &mut TickInput, state: &GameState, target: Vec2) {
    let delta = target - state.blob.pos;
    input.left = delta.x < -DEADZONE;
    input.right = delta.x > DEADZONE;
    input.up = delta.y < -DEADZONE;
    input.down = delta.y > DEADZONE;

    // The simulation inverts controls while nauseous; pre-invert to cancel it
    if state.blob.emotions.is_active(Emotion::Nausea) {
        input.left = !input.left;
        input.right = !input.right;
        input.up = !input.up;
        input.down = !input.down;
    }
}
