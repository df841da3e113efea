//! User settings read from `settings.json` in the config directory.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use datatable_lib::config::TableConfig;
use datatable_lib::error::ConfigError;
use serde::Deserialize;
use simplelog::LevelFilter;
use thiserror::Error;

use crate::billing;
use crate::paths;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log level '{0}'")]
    LogLevel(String),
    #[error("invalid table settings: {0}")]
    Table(#[from] ConfigError),
}

/// Application settings.
///
/// Every field is optional in the file. A `table` object replaces the
/// page's own table settings, with library defaults for missing keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// Simulated latency of the mock API.
    pub latency_ms: u64,
    pub table: TableConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            latency_ms: 500,
            table: billing::table_config(),
        }
    }
}

impl Settings {
    /// Load settings from the platform config directory.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match paths::settings_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(contents)?;
        settings.level_filter()?;
        settings.table.validate()?;
        Ok(settings)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
