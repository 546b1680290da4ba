//! Player preferences
//!
//! Persisted as JSON next to the best score. The in-game sound toggle is
//! deliberately not written back here; it only lasts for the page/process.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::storage::KeyValueStore;

/// Presentation and demo-mode preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Volume of the bite sound (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Begin with sound off
    pub start_muted: bool,
    /// Draw grid lines on the board
    pub grid_lines: bool,
    /// Let the autopilot steer (idle/demo mode)
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 0.35,
            start_muted: false,
            grid_lines: true,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Volume clamped to the playable range
    pub fn effective_volume(&self) -> f32 {
        self.sfx_volume.clamp(0.0, 1.0)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No saved settings, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set_item(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}
