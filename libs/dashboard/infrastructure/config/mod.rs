//! Dashboard configuration
//!
//! Loaded from `config/dashboard_config.yaml`, with `.env` and environment
//! overrides applied on top.

use crate::domain::{DEFAULT_TRADES_LIMIT, MAX_TRADES_LIMIT};
use livesync::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the holdings API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file for the terminal UI, logging is disabled there when unset
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Rows requested by the trades view
    #[serde(default = "default_trades_limit")]
    pub trades_limit: u16,
    /// Poll cadence shared by both views
    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_trades_limit() -> u16 {
    DEFAULT_TRADES_LIMIT
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
            log_file: None,
            request_timeout_secs: default_request_timeout_secs(),
            trades_limit: default_trades_limit(),
            sync: SyncConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config: DashboardConfig = serde_yaml::from_str(&yaml_content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load from YAML when the file exists, otherwise start from defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        info!("Config file {} not found, using defaults", path.display());
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        dotenv::dotenv().ok();

        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            if !api_url.trim().is_empty() {
                info!("Overriding API URL from environment variable");
                self.api_url = api_url.trim().to_string();
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "api_url must start with http:// or https:// (got '{}')",
                self.api_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.trades_limit == 0 || self.trades_limit > MAX_TRADES_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "trades_limit must be between 1 and {}",
                MAX_TRADES_LIMIT
            )));
        }

        self.sync
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  API URL: {}", self.api_url);
        info!("  Poll interval: {} ms", self.sync.base_interval_ms);
        info!("  Jitter window: {} ms", self.sync.jitter_window_ms);
        info!("  Request timeout: {} seconds", self.request_timeout_secs);
        info!("  Trades limit: {}", self.trades_limit);
        info!("  Log level: {}", self.log_level);
        if let Some(file) = &self.log_file {
            info!("  Log file: {}", file);
        }
    }
}
