//! Configuration loading and management
//!
//! Handles parsing of the optional `.kan.toml` file in the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// Name of the configuration file
pub const CONFIG_FILE: &str = ".kan.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Board file, relative to the directory holding the config
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Prefix for generated item ids (`<prefix>-<n>`)
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Lane whose items no longer block their dependants
    #[serde(default = "default_done_lane")]
    pub done_lane: String,

    /// How long to wait for another invocation to release the board
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            id_prefix: default_id_prefix(),
            done_lane: default_done_lane(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("kanban.toml")
}

fn default_id_prefix() -> String {
    "KAN".to_string()
}

fn default_done_lane() -> String {
    "done".to_string()
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Config {
    /// Load configuration from a `.kan.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `dir`, or return defaults when there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Board file path, resolved against `dir` when relative
    pub fn board_path(&self, dir: &Path) -> PathBuf {
        if self.file.is_absolute() {
            self.file.clone()
        } else {
            dir.join(&self.file)
        }
    }

    fn validate(&self) -> Result<()> {
        let prefix = self.id_prefix.trim();
        if prefix.is_empty() {
            return Err(Error::InvalidConfig("id_prefix cannot be empty".to_string()));
        }
        if prefix != self.id_prefix {
            return Err(Error::InvalidConfig(
                "id_prefix cannot have surrounding whitespace".to_string(),
            ));
        }
        if !prefix.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(Error::InvalidConfig(
                "id_prefix must be alphanumeric".to_string(),
            ));
        }
        if self.done_lane.trim().is_empty() {
            return Err(Error::InvalidConfig("done_lane cannot be empty".to_string()));
        }
        if self.file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("file cannot be empty".to_string()));
        }
        Ok(())
    }
}
