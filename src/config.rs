//! Optional per-user overrides
//!
//! Reads ~/.config/waybar-probes/probes.toml. Every key is optional and a
//! missing or broken file means defaults; a probe never fails over config.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Window class (lower-case) -> glyph, merged over the built-in table
    #[serde(default)]
    pub glyphs: HashMap<String, String>,

    /// Glyph for classes missing from the table
    #[serde(default)]
    pub default_glyph: Option<String>,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Extra exclusions, appended to the built-in lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub exclude_fs_types: Vec<String>,
    #[serde(default)]
    pub exclude_mounts: Vec<String>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("waybar-probes").join("probes.toml"))
    }

    /// Load config from the default location, or defaults
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            tracing::debug!("Could not determine config directory, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from file, or return default if not found or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
