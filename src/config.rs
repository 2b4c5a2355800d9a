//! Application configuration module
//!
//! Startup defaults for the workspace are kept in a `confy` file under the
//! OS-specific config directory. Editor text is never written here.

use crate::constant::{APP_NAME, DEFAULT_THEME, DEFAULT_VISIBLE_LINES};
use crate::language::Language;
use crate::workspace::{DiffMode, DiffWorkspace};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// A fresh workspace using the configured defaults
    pub fn workspace(&self) -> DiffWorkspace {
        DiffWorkspace::new(
            self.settings.default_num_lines,
            self.settings.default_language,
            self.settings.default_diff_mode,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Visible lines in the editor and diff panels (clamped to 10..=50)
    #[serde(default = "default_num_lines")]
    pub default_num_lines: u32,

    #[serde(default)]
    pub default_language: Language,

    #[serde(default)]
    pub default_diff_mode: DiffMode,

    /// Name of a syntect bundled theme
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_num_lines() -> u32 {
    DEFAULT_VISIBLE_LINES
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_num_lines: default_num_lines(),
            default_language: Language::default(),
            default_diff_mode: DiffMode::default(),
            theme: default_theme(),
        }
    }
}
