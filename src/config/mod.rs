//! Configuration handling for gh-automerge.
//!
//! Everything the watcher needs is discovered at runtime, so configuration
//! is optional. An `automerge.toml` found in the current directory or any
//! parent can override the poll interval and the git/gh executables.

use crate::core::error::{Error, Result};
use crate::core::git::DEFAULT_GIT_PROGRAM;
use crate::core::github::DEFAULT_GH_PROGRAM;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "automerge.toml";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between polls, as a humantime duration ("5s", "1m").
    pub poll_interval: String,
    /// git executable.
    pub git: String,
    /// GitHub CLI executable.
    pub gh: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: "5s".to_string(),
            git: DEFAULT_GIT_PROGRAM.to_string(),
            gh: DEFAULT_GH_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration found from the current directory, or defaults.
    pub fn load_or_default() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io("get current dir", e))?;
        Self::load_or_default_from(&cwd)
    }

    /// Loads configuration found from `start`, or defaults if there is none.
    pub fn load_or_default_from(start: &Path) -> Result<Self> {
        match Self::find_config_file_from(start) {
            Ok(path) => Self::load_from(&path),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io("read config", e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config_parse_with_source("Failed to parse TOML", e))?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Finds the configuration file by searching up the directory tree.
    pub fn find_config_file_from(start: &Path) -> Result<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Ok(config_path);
            }
            current = dir.parent();
        }

        Err(Error::ConfigNotFound {
            path: start.join(CONFIG_FILE_NAME),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let interval = humantime::parse_duration(&self.poll_interval).map_err(|_| {
            Error::config_invalid(
                "poll_interval",
                format!("Invalid duration: {}", self.poll_interval),
            )
        })?;

        if interval.is_zero() {
            return Err(Error::config_invalid(
                "poll_interval",
                "must be greater than zero",
            ));
        }

        if self.git.trim().is_empty() {
            return Err(Error::config_invalid("git", "must not be empty"));
        }

        if self.gh.trim().is_empty() {
            return Err(Error::config_invalid("gh", "must not be empty"));
        }

        Ok(())
    }

    /// Delay between polls.
    ///
    /// Falls back to the default if the value was never validated.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        humantime::parse_duration(&self.poll_interval)
            .unwrap_or(crate::core::poll::DEFAULT_POLL_INTERVAL)
    }
}
