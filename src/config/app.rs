//! Main application configuration
//!
//! This module defines the configuration shared by the `tsrate` and
//! `detail2export` tools, including TOML file loading, environment variable
//! overrides and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub input: InputSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Settings describing the league's report files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Player name marking a forfeited match
    pub forfeit_sentinel: String,
    /// Time of day attached to detail report dates (HH:MM)
    pub match_time: String,
    /// Default output file of `tsrate`
    pub ratings_file: String,
    /// Default output file of `detail2export`
    pub export_file: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            forfeit_sentinel: "Anonymous".to_string(),
            match_time: "19:00".to_string(),
            ratings_file: "ratings.csv".to_string(),
            export_file: "export.csv".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| anyhow!("Failed to parse configuration: {}", e))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("TSRATE_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(sentinel) = env::var("TSRATE_FORFEIT_SENTINEL") {
            self.input.forfeit_sentinel = sentinel;
        }
        if let Ok(match_time) = env::var("TSRATE_MATCH_TIME") {
            self.input.match_time = match_time;
        }
        if let Ok(algorithm) = env::var("TSRATE_ALGORITHM") {
            self.rating.algorithm = algorithm
                .parse()
                .map_err(|_| anyhow!("Invalid TSRATE_ALGORITHM value: {}", algorithm))?;
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.input.forfeit_sentinel.is_empty() {
        return Err(anyhow!("Forfeit sentinel cannot be empty"));
    }
    if NaiveTime::parse_from_str(&config.input.match_time, "%H:%M").is_err() {
        return Err(anyhow!(
            "Invalid match time (expected HH:MM): {}",
            config.input.match_time
        ));
    }
    if config.input.ratings_file.is_empty() || config.input.export_file.is_empty() {
        return Err(anyhow!("Default output file names cannot be empty"));
    }

    config.rating.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatingAlgorithm;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.input.forfeit_sentinel, "Anonymous");
        assert_eq!(config.input.match_time, "19:00");
        assert_eq!(config.rating.algorithm, RatingAlgorithm::TrueSkill);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [input]
            forfeit_sentinel = "Forfeit"

            [rating]
            algorithm = "weng_lin"
            "#,
        )
        .unwrap();

        assert_eq!(config.input.forfeit_sentinel, "Forfeit");
        assert_eq!(config.input.match_time, "19:00");
        assert_eq!(config.service.log_level, "warn");
        assert_eq!(config.rating.algorithm, RatingAlgorithm::WengLin);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_trueskill_parameters_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [rating.trueskill]
            initial_rating = 30.0
            initial_uncertainty = 5.0

            [rating.trueskill.trueskill_config]
            draw_probability = 0.2
            beta = 4.0
            default_dynamics = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.trueskill.initial_rating, 30.0);
        assert_eq!(config.rating.trueskill.trueskill_config.draw_probability, 0.2);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.input.forfeit_sentinel.clear();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.input.match_time = "7pm".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsrate.toml");
        std::fs::write(&path, "[service]\nlog_level = \"debug\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        // TSRATE_LOG_LEVEL may be set in the environment running the tests
        if env::var("TSRATE_LOG_LEVEL").is_err() {
            assert_eq!(config.service.log_level, "debug");
        }
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(AppConfig::from_file(Path::new("/nonexistent/tsrate.toml")).is_err());
    }
}
