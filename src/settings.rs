//! Engine settings
//!
//! Persisted as JSON next to the caller's other preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LadderError, StoreError};

/// Ladder engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderSettings {
    // === Generation ===
    /// Fewest rungs a ladder may have (inclusive)
    pub min_rungs: u32,
    /// Most rungs a ladder may have (inclusive)
    pub max_rungs: u32,
    /// Vertical bounds; rungs sit strictly between them
    pub top: f32,
    pub bottom: f32,

    // === Session ===
    /// Largest player count accepted at setup
    pub max_players: usize,

    // === Reveal ===
    /// Pen speed along a path (ladder units per second)
    pub reveal_speed: f32,
}

impl Default for LadderSettings {
    fn default() -> Self {
        Self {
            min_rungs: DEFAULT_MIN_RUNGS,
            max_rungs: DEFAULT_MAX_RUNGS,
            top: LADDER_TOP,
            bottom: LADDER_BOTTOM,
            max_players: DEFAULT_MAX_PLAYERS,
            reveal_speed: DEFAULT_REVEAL_SPEED,
        }
    }
}

impl LadderSettings {
    /// Check that the settings describe a usable ladder
    pub fn validate(&self) -> Result<(), LadderError> {
        if self.min_rungs == 0 {
            return Err(LadderError::InvalidSettings("min_rungs must be at least 1"));
        }
        if self.min_rungs > self.max_rungs {
            return Err(LadderError::InvalidSettings("min_rungs exceeds max_rungs"));
        }
        if self.max_rungs > MAX_RUNGS {
            return Err(LadderError::InvalidSettings("max_rungs exceeds the rung ceiling"));
        }
        if !(self.top < self.bottom) {
            return Err(LadderError::InvalidSettings("top must be above bottom"));
        }
        if self.max_players < MIN_COLUMNS {
            return Err(LadderError::InvalidSettings("max_players must be at least 2"));
        }
        if !(self.reveal_speed > 0.0) {
            return Err(LadderError::InvalidSettings("reveal_speed must be positive"));
        }
        Ok(())
    }

    /// Vertical span between top and bottom
    #[inline]
    pub fn span(&self) -> f32 {
        self.bottom - self.top
    }

    /// Read and validate settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
