//! CLI utilities for binaries
//!
//! Handles configuration path resolution and argument parsing.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (dashboard_config.yaml)
    Dashboard,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        "DASHBOARD_CONFIG_PATH"
    }
}

/// Load configuration path from environment or use default
///
/// A custom path always wins over the environment.
///
/// # Examples
/// ```
/// use holdings_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("dev.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("dev.yaml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return PathBuf::from(path);
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Value following `flag` in `args`, e.g. `--entity zurich`
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Config path from `--config <path>`, falling back to the environment
pub fn config_path_from_args(args: &[String]) -> PathBuf {
    match flag_value(args, "--config") {
        Some(path) => load_config_from_env(ConfigType::Custom(path.to_string())),
        None => load_config_from_env(ConfigType::Dashboard),
    }
}
