//! Configuration types.
//!
//! Configuration lives in `<config_dir>/vitrine/config.toml`. A missing file
//! yields defaults; the API key can also come from the environment so it
//! stays out of dotfiles.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "VITRINE_API_KEY";

/// Runtime configuration for the catalog browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the object query endpoint.
    pub api_base: String,

    /// API key sent with every query.
    pub api_key: String,

    /// Records requested per page.
    pub page_size: u32,

    /// Keyword for the initial search shown before any interaction.
    pub default_keyword: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.harvardartmuseums.org/object".to_string(),
            api_key: String::new(),
            page_size: 10,
            default_keyword: "cat".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    ///
    /// Missing file means defaults. `VITRINE_API_KEY` overrides the file's
    /// key either way.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path().ok_or(ConfigError::NoConfigDir)?;
        let mut config = Self::load_from(&path)?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = key;
            }
        }
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vitrine"))
}

/// Get the path to config.toml.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
