//! Game session configuration.
//!
//! The engine accepts any board size; the allowed range lives here, with
//! the caller that starts sessions.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length.
    #[serde(default = "default_size")]
    size: usize,

    /// Marker shown for player 0.
    #[serde(default = "default_marker_zero")]
    marker_zero: String,

    /// Marker shown for player 1.
    #[serde(default = "default_marker_one")]
    marker_one: String,

    /// Seed for choosing the first player; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Smallest allowed board size.
    #[serde(default = "default_min_size")]
    min_size: usize,

    /// Largest allowed board size.
    #[serde(default = "default_max_size")]
    max_size: usize,
}

fn default_size() -> usize {
    3
}

fn default_marker_zero() -> String {
    "X".to_string()
}

fn default_marker_one() -> String {
    "O".to_string()
}

fn default_min_size() -> usize {
    3
}

fn default_max_size() -> usize {
    5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            marker_zero: default_marker_zero(),
            marker_one: default_marker_one(),
            seed: None,
            min_size: default_min_size(),
            max_size: default_max_size(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(size = config.size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the board size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces both markers.
    pub fn with_markers(mut self, zero: impl Into<String>, one: impl Into<String>) -> Self {
        self.marker_zero = zero.into();
        self.marker_one = one.into();
        self
    }

    /// Checks the size range and markers.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size == 0 || self.min_size > self.max_size {
            return Err(ConfigError::new(format!(
                "Invalid size range {}..={}",
                self.min_size, self.max_size
            )));
        }
        if !(self.min_size..=self.max_size).contains(&self.size) {
            return Err(ConfigError::new(format!(
                "Board size {} outside allowed range {}..={}",
                self.size, self.min_size, self.max_size
            )));
        }
        if self.marker_zero.trim().is_empty() || self.marker_one.trim().is_empty() {
            return Err(ConfigError::new("Markers must not be blank".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_empty_file() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_size_outside_range_rejected() {
        let config = GameConfig::default().with_size(6);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("outside allowed range"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GameConfig::from_toml("min_size = 5\nmax_size = 3\nsize = 4").unwrap();
        assert!(config.validate().is_err());
    }
}
