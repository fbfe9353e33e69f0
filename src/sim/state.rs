//! Game state and core simulation types
//!
//! Everything the per-tick functions mutate lives in one `GameState` owned by
//! the main loop. Boxes and holes are fixed tables; cross references between
//! them are indices, never pointers.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;
use crate::tuning::Tuning;

/// Number of boxes (and holes) in the arena
pub const BOX_COUNT: usize = 4;

/// Color tag shared by boxes, holes and the emotion they trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl BoxColor {
    pub const ALL: [BoxColor; BOX_COUNT] =
        [BoxColor::Red, BoxColor::Green, BoxColor::Blue, BoxColor::Yellow];

    pub fn name(self) -> &'static str {
        match self {
            BoxColor::Red => "red",
            BoxColor::Green => "green",
            BoxColor::Blue => "blue",
            BoxColor::Yellow => "yellow",
        }
    }

    /// Emotion triggered by seating a box of this color
    pub fn emotion(self) -> Emotion {
        match self {
            BoxColor::Red => Emotion::Anger,
            BoxColor::Green => Emotion::Nausea,
            BoxColor::Blue => Emotion::Sadness,
            BoxColor::Yellow => Emotion::Joy,
        }
    }

    /// Fill color used for boxes
    pub fn fill(self) -> Rgba {
        match self {
            BoxColor::Red => Rgba::rgb(255.0, 0.0, 0.0),
            BoxColor::Green => Rgba::rgb(0.0, 128.0, 0.0),
            BoxColor::Blue => Rgba::rgb(0.0, 0.0, 255.0),
            BoxColor::Yellow => Rgba::rgb(255.0, 255.0, 0.0),
        }
    }

    /// Pure hue used for hole auras
    pub fn aura(self) -> Rgba {
        match self {
            BoxColor::Red => Rgba::rgb(255.0, 0.0, 0.0),
            BoxColor::Green => Rgba::rgb(0.0, 255.0, 0.0),
            BoxColor::Blue => Rgba::rgb(0.0, 0.0, 255.0),
            BoxColor::Yellow => Rgba::rgb(255.0, 255.0, 0.0),
        }
    }
}

/// Emotion effects a seated box applies to the blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    /// Wobble x2.5
    Anger,
    /// Controls reversed
    Nausea,
    /// Speed x1.5
    Joy,
    /// Speed x0.4, coarse outline
    Sadness,
}

impl Emotion {
    /// Fixed iteration order for timers and HUD text
    pub const ALL: [Emotion; 4] = [Emotion::Anger, Emotion::Nausea, Emotion::Joy, Emotion::Sadness];

    const fn index(self) -> usize {
        match self {
            Emotion::Anger => 0,
            Emotion::Nausea => 1,
            Emotion::Joy => 2,
            Emotion::Sadness => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Nausea => "nausea",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }

    /// Screen tint applied when the emotion activates
    pub fn tint(self) -> Rgba {
        match self {
            Emotion::Anger => Rgba::new(255.0, 100.0, 100.0, 100.0),
            Emotion::Nausea => Rgba::new(150.0, 255.0, 150.0, 100.0),
            Emotion::Joy => Rgba::new(255.0, 255.0, 100.0, 80.0),
            Emotion::Sadness => Rgba::new(100.0, 150.0, 255.0, 80.0),
        }
    }
}

/// Remaining ticks per emotion (`None` = inactive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTimers {
    ticks: [Option<u32>; 4],
}

impl EmotionTimers {
    pub fn get(&self, emotion: Emotion) -> Option<u32> {
        self.ticks[emotion.index()]
    }

    pub fn is_active(&self, emotion: Emotion) -> bool {
        self.ticks[emotion.index()].is_some()
    }

    /// Set a countdown; zero is stored as inactive
    pub fn set(&mut self, emotion: Emotion, ticks: u32) {
        self.ticks[emotion.index()] = (ticks > 0).then_some(ticks);
    }

    /// Clear an emotion, returning whether it was active
    pub fn clear(&mut self, emotion: Emotion) -> bool {
        self.ticks[emotion.index()].take().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.iter().all(Option::is_none)
    }

    /// Active emotions with their remaining ticks, in fixed order
    pub fn active(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        Emotion::ALL
            .into_iter()
            .filter_map(|e| self.get(e).map(|t| (e, t)))
    }
}

/// Straight-alpha color with 0-255 channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 255.0)
    }

    pub const fn gray(v: f32, a: f32) -> Self {
        Self::new(v, v, v, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Normalized [0, 1] channels for GPU vertex colors
    pub fn to_unit(self) -> [f32; 4] {
        [self.r / 255.0, self.g / 255.0, self.b / 255.0, self.a / 255.0]
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Outline resolution handed to the renderer
    pub points: u32,
    /// Current edge deformation amplitude
    pub wobble: f32,
    /// Animation phase for the breathing outline
    pub phase: f32,
    pub emotions: EmotionTimers,
    /// Index into `GameState::boxes`
    pub held_box: Option<usize>,
}

impl Blob {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::new(BLOB_START_X, BLOB_START_Y),
            vel: Vec2::ZERO,
            radius,
            points: BLOB_POINTS,
            wobble: BLOB_WOBBLE,
            phase: 0.0,
            emotions: EmotionTimers::default(),
            held_box: None,
        }
    }
}

/// A colored box (positioned by its center)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameBox {
    pub color: BoxColor,
    pub pos: Vec2,
    pub size: f32,
    pub held: bool,
    /// Sliding off the arena after an emotion expired
    pub sliding: bool,
    pub vel: Vec2,
    /// Within pickup reach this tick
    #[serde(skip)]
    pub near_blob: bool,
}

impl GameBox {
    pub fn new(color: BoxColor, x: f32, y: f32) -> Self {
        Self {
            color,
            pos: Vec2::new(x, y),
            size: BOX_SIZE,
            held: false,
            sliding: false,
            vel: Vec2::ZERO,
            near_blob: false,
        }
    }
}

/// A colored hole (positioned by its top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub color: BoxColor,
    pub pos: Vec2,
    pub size: f32,
    pub aura_radius: f32,
    /// Index of the seated box
    pub placed_box: Option<usize>,
    /// Emotion this hole's occupant is responsible for
    pub emotion: Option<Emotion>,
    /// Blob is inside the aura holding a matching box this tick
    #[serde(skip)]
    pub can_place: bool,
}

impl Hole {
    pub fn new(color: BoxColor, x: f32, y: f32) -> Self {
        Self {
            color,
            pos: Vec2::new(x, y),
            size: HOLE_SIZE,
            aura_radius: HOLE_AURA_RADIUS,
            placed_box: None,
            emotion: None,
            can_place: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Where a box currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxState {
    /// Standing on the floor, can be picked up
    Free,
    /// Carried by the blob
    Held,
    /// Seated in the hole with this index
    Placed(usize),
    /// Sliding toward the arena edge
    Sliding,
}

/// Notable transitions produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PickedUp { box_index: usize },
    Placed { box_index: usize, hole_index: usize },
    GroundDropped { box_index: usize },
    EmotionActivated(Emotion),
    EmotionEnded(Emotion),
    Expelled { box_index: usize },
    Respawned { box_index: usize },
    Victory,
    Reset,
}

/// Initial box layout
pub fn initial_boxes() -> [GameBox; BOX_COUNT] {
    [
        GameBox::new(BoxColor::Red, 150.0, 100.0),
        GameBox::new(BoxColor::Green, 450.0, 80.0),
        GameBox::new(BoxColor::Blue, 200.0, 280.0),
        GameBox::new(BoxColor::Yellow, 500.0, 250.0),
    ]
}

/// Initial hole layout
pub fn initial_holes() -> [Hole; BOX_COUNT] {
    [
        Hole::new(BoxColor::Red, 100.0, 250.0),
        Hole::new(BoxColor::Green, 500.0, 150.0),
        Hole::new(BoxColor::Blue, 300.0, 300.0),
        Hole::new(BoxColor::Yellow, 50.0, 100.0),
    ]
}

fn new_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed for respawn positions
    pub seed: u64,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub blob: Blob,
    pub boxes: [GameBox; BOX_COUNT],
    pub holes: [Hole; BOX_COUNT],
    /// Full-screen overlay color, alpha fades every tick
    pub tint: Rgba,
    /// Latched once every hole is filled
    pub victory: bool,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game with custom tuning
    ///
    /// `tuning` must pass `Tuning::check`; an inset that leaves no respawn
    /// area panics on the first respawn. Use `try_with_tuning` for values
    /// that have not been validated.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.check().is_none(), "{:?}", tuning.check());
        Self {
            seed,
            blob: Blob::new(tuning.blob_radius),
            tuning,
            time_ticks: 0,
            boxes: initial_boxes(),
            holes: initial_holes(),
            tint: Rgba::TRANSPARENT,
            victory: false,
            rng: new_rng(seed),
        }
    }

    /// Like `with_tuning`, but rejects out-of-range tuning
    pub fn try_with_tuning(seed: u64, tuning: Tuning) -> Result<Self, SettingsError> {
        match tuning.check() {
            Some(msg) => Err(SettingsError::Invalid(msg)),
            None => Ok(Self::with_tuning(seed, tuning)),
        }
    }

    /// The box currently carried by the blob
    pub fn held_box(&self) -> Option<&GameBox> {
        self.blob.held_box.map(|i| &self.boxes[i])
    }

    /// Index of the hole the box is seated in
    pub fn hole_of(&self, box_index: usize) -> Option<usize> {
        self.holes
            .iter()
            .position(|h| h.placed_box == Some(box_index))
    }

    /// Hole index that owns an emotion
    pub fn hole_with_emotion(&self, emotion: Emotion) -> Option<usize> {
        self.holes.iter().position(|h| h.emotion == Some(emotion))
    }

    pub fn box_state(&self, box_index: usize) -> BoxState {
        let b = &self.boxes[box_index];
        if b.held {
            BoxState::Held
        } else if b.sliding {
            BoxState::Sliding
        } else if let Some(hole) = self.hole_of(box_index) {
            BoxState::Placed(hole)
        } else {
            BoxState::Free
        }
    }

    /// Checks the cross-table invariants, returning the first violation
    pub fn invariant_violation(&self) -> Option<String> {
        if let Some(i) = self.blob.held_box {
            if i >= BOX_COUNT {
                return Some(format!("held index {i} out of range"));
            }
            if !self.boxes[i].held {
                return Some(format!("held index {i} points at a box not marked held"));
            }
            if self.hole_of(i).is_some() {
                return Some(format!("held box {i} is also seated in a hole"));
            }
        }
        for (i, b) in self.boxes.iter().enumerate() {
            if b.held && self.blob.held_box != Some(i) {
                return Some(format!("box {i} marked held but blob holds {:?}", self.blob.held_box));
            }
            if b.held && b.sliding {
                return Some(format!("box {i} is both held and sliding"));
            }
            if b.sliding && self.hole_of(i).is_some() {
                return Some(format!("box {i} is sliding out of a hole"));
            }
            if self.holes.iter().filter(|h| h.placed_box == Some(i)).count() > 1 {
                return Some(format!("box {i} seated in more than one hole"));
            }
        }
        for emotion in Emotion::ALL {
            let owners = self.holes.iter().filter(|h| h.emotion == Some(emotion)).count();
            if owners > 1 {
                return Some(format!("{} owned by {owners} holes", emotion.name()));
            }
            if owners == 1 && !self.blob.emotions.is_active(emotion) {
                return Some(format!("{} bound to a hole but inactive", emotion.name()));
            }
        }
        None
    }
}
