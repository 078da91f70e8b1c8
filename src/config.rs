//! TOML-based configuration.
//!
//! Stored at `~/.config/tabcalc/config.toml` (platform config dir). A missing
//! file means defaults; every field is optional.

use crate::calculator::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of entries kept in the session history.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show thousand separators in the display.
    #[serde(default)]
    pub group_thousands: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// Default location has no file yet.
    DefaultMissing(PathBuf),
    /// A path given explicitly does not exist.
    ExplicitMissing(PathBuf),
    /// The platform has no config directory.
    NoConfigDir,
}

impl ConfigSource {
    /// Log the outcome. Call after the subscriber is installed.
    pub fn log(&self) {
        match self {
            Self::File(path) => tracing::info!(path = %path.display(), "Loaded config"),
            Self::DefaultMissing(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults")
            }
            Self::ExplicitMissing(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults")
            }
            Self::NoConfigDir => {
                tracing::warn!("No config directory on this platform, using defaults")
            }
        }
    }

    pub fn is_defaults(&self) -> bool {
        !matches!(self, Self::File(_))
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Default config location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tabcalc").join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A file that doesn't exist yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`Config::load`], also reporting where the values came from.
    pub fn load_with_source(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok((Self::default(), ConfigSource::NoConfigDir)),
            },
        };

        if !path.exists() {
            let source = if explicit {
                ConfigSource::ExplicitMissing(path)
            } else {
                ConfigSource::DefaultMissing(path)
            };
            return Ok((Self::default(), source));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok((config, ConfigSource::File(path)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
