//! Configuration loading and validation.
//!
//! The binary reads an optional TOML file into `EngineConfig`; missing
//! sections fall back to defaults. Scoring feeds the stats fold and the
//! Swiss section feeds the bye fallback.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

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

/// Points credited per game outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_win")]
    pub win: f64,

    #[serde(default = "default_draw")]
    pub draw: f64,

    #[serde(default)]
    pub loss: f64,

    /// Points for a bye (counted as a win)
    #[serde(default = "default_win")]
    pub bye: f64,
}

fn default_win() -> f64 {
    1.0
}

fn default_draw() -> f64 {
    0.5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win: default_win(),
            draw: default_draw(),
            loss: 0.0,
            bye: default_win(),
        }
    }
}

/// What Swiss pairing does with a player who has no unplayed opponent left
/// and has already received a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByeFallback {
    /// Pair with the nearest unpaired player even if they met before; grant a
    /// second bye only when nobody is left.
    #[default]
    RepeatPairing,
    /// Leave the player out of the round and report them as unpaired.
    LeaveUnpaired,
}

/// Swiss pairing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwissConfig {
    #[serde(default)]
    pub bye_fallback: ByeFallback,
}

/// Main engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub swiss: SwissConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            scoring: ScoringConfig::default(),
            swiss: SwissConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        for (name, value) in [
            ("win", scoring.win),
            ("draw", scoring.draw),
            ("loss", scoring.loss),
            ("bye", scoring.bye),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "Scoring value '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if scoring.win < scoring.draw || scoring.draw < scoring.loss {
            return Err(ConfigError::ValidationError(
                "Scoring must satisfy win >= draw >= loss".to_string(),
            ));
        }

        Ok(())
    }
}
