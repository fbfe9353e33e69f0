//! Emotion Blob - a small arena game about carrying feelings around
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, interaction, emotions, box lifecycle)
//! - `renderer`: Frame snapshot, draw pass and CPU tessellation for any backend
//! - `input`: Keyboard mapping to per-tick input
//! - `settings`: JSON configuration
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 360.0;

    /// Virtual frame rate - every duration in the game is counted in ticks
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Width of the grey band around the arena
    pub const EDGE_ZONE: f32 = 30.0;

    /// Blob spawn point (canvas center)
    pub const BLOB_START_X: f32 = 320.0;
    pub const BLOB_START_Y: f32 = 180.0;

    /// Outline resolution of the blob
    pub const BLOB_POINTS: u32 = 48;
    /// Coarse outline used while sad
    pub const BLOB_POINTS_SAD: u32 = 12;
    /// Base edge deformation
    pub const BLOB_WOBBLE: f32 = 7.0;
    pub const BLOB_WOBBLE_FREQ: f32 = 0.9;
    /// Animation phase advance per tick
    pub const BLOB_PHASE_STEP: f32 = 0.01;

    /// Box and hole dimensions
    pub const BOX_SIZE: f32 = 30.0;
    pub const HOLE_SIZE: f32 = 50.0;
    pub const HOLE_AURA_RADIUS: f32 = 80.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
