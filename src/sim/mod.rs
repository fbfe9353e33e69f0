//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, durations counted in ticks
//! - Seeded RNG only
//! - Stable iteration order (by table index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod emotion;
pub mod interaction;
pub mod lifecycle;
pub mod movement;
pub mod state;
pub mod tick;
pub mod victory;

pub use movement::{Directions, Modifiers};
pub use state::{
    BOX_COUNT, Blob, BoxColor, BoxState, Emotion, EmotionTimers, GameBox, GameEvent, GameState,
    Hole, Rgba,
};
pub use tick::{TickInput, tick};
