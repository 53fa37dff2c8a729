//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Extreme => "EXTREME",
        }
    }

    /// Parse a difficulty name; anything unrecognised is `Normal`
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "extreme" | "hard" => Difficulty::Extreme,
            "normal" => Difficulty::Normal,
            other => {
                log::warn!("Unknown difficulty {:?}, using NORMAL", other);
                Difficulty::Normal
            }
        }
    }

    /// Multiplier on every step Granny takes
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Extreme => 1.2,
        }
    }

    /// Multiplier on Granny's per-day base speed
    pub fn day_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Extreme => 1.4,
        }
    }

    /// How far Granny can spot an unhidden player
    pub fn sight_radius(&self) -> f32 {
        use crate::consts::{SIGHT_RADIUS, SIGHT_RADIUS_EXTREME};
        match self {
            Difficulty::Easy | Difficulty::Normal => SIGHT_RADIUS,
            Difficulty::Extreme => SIGHT_RADIUS_EXTREME,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Movement sensitivity applied to the player's stick
    pub sensitivity: f32,

    // === Cosmetic, not read by the simulation ===
    pub show_scanlines: bool,
    pub blood_effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sensitivity: 1.0,
            show_scanlines: true,
            blood_effects: true,
        }
    }
}

impl Settings {
    pub const MIN_SENSITIVITY: f32 = 0.5;
    pub const MAX_SENSITIVITY: f32 = 2.0;

    /// Sensitivity clamped to the supported range (NaN falls back to 1.0)
    pub fn effective_sensitivity(&self) -> f32 {
        if self.sensitivity.is_nan() {
            return 1.0;
        }
        self.sensitivity
            .clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), crate::StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
