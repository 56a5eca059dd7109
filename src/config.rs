//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section is optional; missing keys fall back to defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::engine::TeamShare;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub round: RoundConfig,
    #[serde(default)]
    pub settlement: SettlementConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoundConfig {
    /// Round JSON used when no path is given on the command line.
    #[serde(default = "default_round_file")]
    pub file: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub tee: Option<String>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self { file: default_round_file(), course: None, tee: None }
    }
}

fn default_round_file() -> String {
    crate::storage::DEFAULT_ROUND_FILE.to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettlementConfig {
    /// How four-ball results are booked to each teammate.
    #[serde(default)]
    pub team_share: TeamShare,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { decimals: default_decimals(), currency: default_currency() }
    }
}

fn default_decimals() -> u32 {
    2
}

fn default_currency() -> String {
    "$".to_string()
}

/// Log output settings. `RUST_LOG` and `FAIRWAY_LOG_JSON` override these.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"fairway=debug"`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

fn default_log_filter() -> String {
    "fairway=info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
