//! Game settings and preferences
//!
//! Loaded from an optional JSON file. Every field has a default, so a partial
//! file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::DrawOptions;
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for box respawn positions
    pub seed: u64,
    /// Let the demo autopilot play
    pub autopilot: bool,
    /// Tick limit for headless runs
    pub max_ticks: u64,

    // === HUD ===
    pub show_hud: bool,

    // === Accessibility ===
    /// Skip the full-screen emotion tint and cap the outline wobble
    pub reduced_motion: bool,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            autopilot: false,
            max_ticks: 60 * 60, // one minute
            show_hud: true,
            reduced_motion: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.tuning.check() {
            Some(msg) => Err(SettingsError::Invalid(msg)),
            None => Ok(()),
        }
    }

    /// Rendering switches derived from the preferences
    pub fn draw_options(&self) -> DrawOptions {
        DrawOptions {
            hud: self.show_hud,
            tint: !self.reduced_motion,
            max_wobble: if self.reduced_motion { Some(3.0) } else { None },
        }
    }
}
