// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! Display preferences persisted in TOML via `confy`. The airport itself is
//! described by a separate document (see `tower_core::airport`); this file
//! only says where to find it and how to show it.

use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use tower_core::sweep::{self, DEFAULT_FRAME_RATE, DEFAULT_SWEEP_FRAMES};

const APP_NAME: &str = "tower-atc";
const CONFIG_NAME: &str = "config";

/// Default airport document, relative to the working directory
pub const DEFAULT_AIRPORT_PATH: &str = "res/airport.toml";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Initial window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Initial window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Target frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Rendered frames per radar sweep
    #[serde(default = "default_sweep_frames")]
    pub sweep_frames: u32,

    /// Path to the airport document
    #[serde(default = "default_airport_path")]
    pub airport_path: PathBuf,

    /// Start with altitude shown in data blocks
    #[serde(default)]
    pub start_in_debug: bool,

    /// Start in the radar scene instead of the surface scene
    #[serde(default)]
    pub start_in_radar: bool,

    /// Data block font size in points
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f32,
}

// Default value functions for serde
fn default_window_width() -> f32 {
    1200.0
}

fn default_window_height() -> f32 {
    600.0
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_sweep_frames() -> u32 {
    DEFAULT_SWEEP_FRAMES
}

fn default_airport_path() -> PathBuf {
    PathBuf::from(DEFAULT_AIRPORT_PATH)
}

fn default_label_font_size() -> f32 {
    15.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            frame_rate: default_frame_rate(),
            sweep_frames: default_sweep_frames(),
            airport_path: default_airport_path(),
            start_in_debug: false,
            start_in_radar: false,
            label_font_size: default_label_font_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Load configuration, falling back to defaults if the file is unreadable
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Failed to load settings, using defaults: {e}");
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Time between kinematic updates
    pub fn sweep_interval(&self) -> Duration {
        sweep::sweep_interval(self.sweep_frames.max(1), self.frame_rate)
    }

    /// Time between repaints at the target frame rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.sweep_frames, 60);
        assert_eq!(config.airport_path, PathBuf::from("res/airport.toml"));
        assert!(!config.start_in_debug);
        assert!(!config.start_in_radar);
    }

    #[test]
    fn test_sweep_interval_follows_frame_rate() {
        let mut config = AppConfig::default();
        assert_eq!(config.sweep_interval(), Duration::from_secs(2));

        config.frame_rate = 60;
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));

        config.sweep_frames = 0;
        assert!(!config.sweep_interval().is_zero());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            toml::from_str("frame_rate = 60\nstart_in_debug = true\nstart_in_radar = true\n")
                .unwrap();
        assert_eq!(config.frame_rate, 60);
        assert!(config.start_in_debug);
        assert!(config.start_in_radar);
        assert_eq!(config.window_width, 1200.0);
        assert_eq!(config.sweep_frames, 60);
    }
}
