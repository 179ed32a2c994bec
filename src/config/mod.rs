pub mod keybindings;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use keybindings::{load_keybindings, KeyCombo, KeyMode, KeybindingConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Conversation list refresh, in seconds.
    pub conversations_secs: u64,
    /// Assignment/campaign refresh, in seconds.
    pub assignment_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            conversations_secs: 20,
            assignment_secs: 60,
        }
    }
}

impl PollConfig {
    pub fn conversations_interval(&self) -> Duration {
        Duration::from_secs(self.conversations_secs.max(1))
    }

    pub fn assignment_interval(&self) -> Duration {
        Duration::from_secs(self.assignment_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Used to build exit routes when the campaign doesn't name one.
    pub organization_id: Option<String>,
    pub poll: PollConfig,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("texter")
                .join("logs")
        })
    }
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir().ok_or(ConfigError::NoConfigDir)?.join("texter"))
}

/// Load `config.toml` from the user config directory. A missing file is not
/// an error.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_dir()?.join("config.toml"))
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
