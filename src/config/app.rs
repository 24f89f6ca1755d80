//! Main application configuration
//!
//! This module defines the configuration for the `rift-matchmaker` binary:
//! service settings, the matchmaking run parameters and output options. It
//! can be loaded from a TOML file or built from defaults, with environment
//! variable overrides applied in both cases.

use crate::config::matchmaking::MatchmakingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub matchmaking: MatchmakingConfig,
    pub output: OutputSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// How generated candidates are presented
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Seed for presentation sampling; unseeded runs vary between calls
    pub seed: Option<u64>,
    /// Shuffle equally balanced candidates before slicing
    pub shuffle_ties: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Invalid output format: {}. Use 'text' or 'json'", s)),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "rift-matchmaker".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            seed: None,
            shuffle_ties: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(options) = env::var("MATCH_OPTIONS") {
            self.matchmaking.match_options = options
                .parse()
                .map_err(|_| anyhow!("Invalid MATCH_OPTIONS value: {}", options))?;
        }
        if let Ok(tolerance) = env::var("MATCH_TOLERANCE") {
            self.matchmaking.tolerance = tolerance
                .parse()
                .map_err(|_| anyhow!("Invalid MATCH_TOLERANCE value: {}", tolerance))?;
        }
        if let Ok(seed) = env::var("SAMPLE_SEED") {
            self.output.seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid SAMPLE_SEED value: {}", seed))?,
            );
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.matchmaking.validate()?;

    Ok(())
}
