use crate::todo::models::Filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// User preferences. Items themselves are never stored here.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Filter the list opens with.
    #[serde(default)]
    pub default_filter: Filter,
    /// Items added to every new session, oldest first.
    #[serde(default)]
    pub initial_items: Vec<String>,
}

pub const KEYS: [&str; 2] = ["default_filter", "initial_items"];

impl Config {
    /// Loads the config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            info!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }

        let content = toml::to_string(self)?;
        fs::write(config_path, content).map_err(ConfigError::Write)?;
        info!(path = %config_path.display(), "config saved");
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "default_filter" => {
                self.default_filter = value
                    .parse()
                    .map_err(|reason| ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason,
                    })?;
            }
            "initial_items" => self.initial_items.push(value.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "default_filter" => Ok(self.default_filter.to_string()),
            "initial_items" => Ok(self.initial_items.join("\n")),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("todos").join("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown configuration key '{0}'. Supported keys: default_filter, initial_items")]
    UnknownKey(String),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
