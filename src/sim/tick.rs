//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame (1/60 s) in a fixed order:
//! movement, interaction flags, discrete action, emotion timers (with
//! expulsions), sliding boxes, victory.

use super::emotion::{fade_tint, tick_emotions};
use super::interaction::update_interaction_flags;
use super::lifecycle::{try_drop, try_pickup, update_sliding};
use super::movement::{Directions, integrate_blob};
use super::state::{GameEvent, GameState};
use super::victory::{check_victory, reset};
use crate::consts::BLOB_PHASE_STEP;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pick up a nearby box (one-shot)
    pub pickup: bool,
    /// Drop the held box (one-shot)
    pub drop: bool,
    /// Restart after victory (one-shot)
    pub restart: bool,
}

impl TickInput {
    pub fn directions(&self) -> Directions {
        Directions {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
        }
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Restart consumes the whole tick
    if input.restart && state.victory {
        reset(state);
        events.push(GameEvent::Reset);
        return events;
    }

    state.time_ticks += 1;

    integrate_blob(state, input.directions());
    state.blob.phase += BLOB_PHASE_STEP;

    update_interaction_flags(state);

    // At most one discrete transition per tick
    if state.blob.held_box.is_none() {
        if input.pickup {
            try_pickup(state, &mut events);
        }
    } else if input.drop {
        try_drop(state, &mut events);
    }

    tick_emotions(state, &mut events);
    fade_tint(state);

    update_sliding(state, &mut events);

    check_victory(state, &mut events);

    events
}
