//! Host settings
//!
//! Persisted as JSON next to the binary (or wherever `MWISORT_SETTINGS`
//! points). Missing or broken files fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SECONDS_FOR_INPUT;
use crate::sim::BombSnapshot;

/// Host settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Idle timer ===
    /// Seconds allowed between accepted digits
    pub idle_timeout_secs: f32,
    /// Strike when the player stalls mid-puzzle
    pub idle_timeout_enabled: bool,

    // === Puzzle ===
    /// Fixed seed for reproducible puzzles; random when unset
    pub seed: Option<u64>,
    /// Bomb readings used at activation
    pub bomb: BombSnapshot,

    // === Output ===
    /// Print puzzle events as JSON lines instead of the grid
    pub json_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: SECONDS_FOR_INPUT,
            idle_timeout_enabled: true,

            seed: None,
            bomb: BombSnapshot::default(),

            json_events: false,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_VAR: &'static str = "MWISORT_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, using defaults if it can't be read
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Load from `MWISORT_SETTINGS`, or defaults when unset
    pub fn load_from_env() -> Self {
        match std::env::var_os(Self::PATH_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Seed to use for a new puzzle
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Idle window, or `None` when the timer is off or the window is unusable
    pub fn effective_idle_window(&self) -> Option<f32> {
        (self.idle_timeout_enabled && self.idle_timeout_secs.is_finite() && self.idle_timeout_secs > 0.0)
            .then_some(self.idle_timeout_secs)
    }
}
