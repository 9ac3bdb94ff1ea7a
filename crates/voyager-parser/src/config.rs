// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::MAX_ACTIVITIES;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "parsing.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Thresholds for the manual parser. Lengths are counted in characters and
/// are exclusive: a value must be strictly longer than the minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub max_activities_per_day: usize,
    pub max_fallback_activities: usize,
    /// Bucket for activity lines seen before any day marker.
    pub default_day: u32,
    pub min_activity_length: usize,
    /// Minimum for raw lines accepted without a bullet or keyword.
    pub min_fallback_line_length: usize,
    pub min_destination_length: usize,
    pub context_lookback_lines: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_activities_per_day: 8,
            max_fallback_activities: 10,
            default_day: 1,
            min_activity_length: 3,
            min_fallback_line_length: 5,
            min_destination_length: 2,
            context_lookback_lines: 3,
        }
    }
}

impl ParsingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ACTIVITIES).contains(&self.max_activities_per_day) {
            return Err(ConfigError::Invalid(format!(
                "max_activities_per_day must be between 1 and {}, got {}",
                MAX_ACTIVITIES, self.max_activities_per_day
            )));
        }
        if !(1..=MAX_ACTIVITIES).contains(&self.max_fallback_activities) {
            return Err(ConfigError::Invalid(format!(
                "max_fallback_activities must be between 1 and {}, got {}",
                MAX_ACTIVITIES, self.max_fallback_activities
            )));
        }
        if self.default_day == 0 {
            return Err(ConfigError::Invalid(
                "default_day must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `parsing.json` in the platform config dir, or the working directory
    /// when no home directory can be resolved.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("org", "voyager", "voyager-t800")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads and validates a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!(
                "[Config] No parser config at {:?}, using defaults",
                path
            );
            return Ok(Self::default());
        }

        log::debug!("[Config] Loading parser config from: {:?}", path);
        let content = fs::read_to_string(path)?;
        let config: ParsingConfig = serde_json::from_str(&content).map_err(|e| {
            log::error!("[Config] JSON parse error for {:?}: {}", path, e);
            e
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("[Config] Saved parser config to {:?}", path);
        Ok(())
    }
}
