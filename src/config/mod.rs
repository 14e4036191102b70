//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::calculate::{RecordThresholds, TossFilter, PLACEHOLDER_TEAMS};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding tosses.jsonl, games.jsonl and teams.jsonl
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Team identifiers never counted
    #[serde(default = "default_excluded_teams")]
    pub excluded_teams: Vec<String>,

    /// Sample-size floors for records
    #[serde(default)]
    pub thresholds: RecordThresholds,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_excluded_teams() -> Vec<String> {
    PLACEHOLDER_TEAMS.iter().map(|s| s.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            excluded_teams: default_excluded_teams(),
            thresholds: RecordThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floors = [
            ("min_tosses", self.thresholds.min_tosses),
            ("min_conversion_tosses", self.thresholds.min_conversion_tosses),
            ("min_rivalry_meetings", self.thresholds.min_rivalry_meetings),
            ("min_season_decisions", self.thresholds.min_season_decisions),
        ];
        for (name, value) in floors {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "thresholds.{} must be greater than 0",
                    name
                )));
            }
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "log_level must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Base toss filter carrying the configured exclusions.
    pub fn filter(&self) -> TossFilter {
        TossFilter::default().with_excluded_teams(self.excluded_teams.clone())
    }
}
