// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_gallery::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedGallery";

/// Scroll speed of the marquee strip, in pixels per second.
pub const DEFAULT_MARQUEE_SPEED: f32 = 250.0;

/// Marquee scroll speeds outside this range are clamped on load.
pub const MIN_MARQUEE_SPEED: f32 = 50.0;
pub const MAX_MARQUEE_SPEED: f32 = 1000.0;

/// Ordering applied to images within the grid and each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Alphabetical,
    ModifiedDate,
    CreatedDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    /// Root directory of the gallery. Subdirectories become categories.
    #[serde(default)]
    pub gallery_dir: Option<PathBuf>,
    #[serde(default)]
    pub marquee_speed: Option<f32>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub theme_mode: Option<ThemeMode>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            gallery_dir: None,
            marquee_speed: Some(DEFAULT_MARQUEE_SPEED),
            sort_order: Some(SortOrder::Alphabetical),
            theme_mode: Some(ThemeMode::System),
        }
    }
}

/// Ensures persisted marquee speeds stay inside the supported range so a
/// hand-edited config cannot request a nonsensical scroll rate.
pub fn clamp_marquee_speed(value: f32) -> f32 {
    value.clamp(MIN_MARQUEE_SPEED, MAX_MARQUEE_SPEED)
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Loads configuration from `dir/settings.toml` when `dir` is given,
/// falling back to the platform config directory otherwise.
pub fn load_with_dir(dir: Option<&Path>) -> Result<Config> {
    match dir {
        Some(dir) => {
            let path = dir.join(CONFIG_FILE);
            if path.exists() {
                load_from_path(&path)
            } else {
                Ok(Config::default())
            }
        }
        None => load(),
    }
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
