//! Integration tests: loading the dashboard configuration from disk

use dashboard::infrastructure::config::{ConfigError, API_URL_ENV};
use dashboard::DashboardConfig;
use parking_lot::Mutex;
use std::io::Write;

/// Serializes tests that touch the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let _guard = ENV_LOCK.lock();
    std::env::remove_var(API_URL_ENV);

    let file = write_config(
        "api_url: http://holdings.internal:8080\n\
         log_level: debug\n\
         log_file: logs/dashboard.log\n\
         request_timeout_secs: 3\n\
         trades_limit: 500\n\
         sync:\n  base_interval_ms: 2000\n  jitter_window_ms: 250\n",
    );

    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config.api_url, "http://holdings.internal:8080");
    assert_eq!(config.log_file.as_deref(), Some("logs/dashboard.log"));
    assert_eq!(config.trades_limit, 500);
    assert_eq!(config.sync.base_interval_ms, 2000);
    assert_eq!(config.sync.jitter_window_ms, 250);
}

#[test]
fn test_env_overrides_api_url() {
    let _guard = ENV_LOCK.lock();

    let file = write_config("api_url: http://from-file:8080\n");
    std::env::set_var(API_URL_ENV, "https://from-env.example");
    let config = DashboardConfig::load(file.path());
    std::env::remove_var(API_URL_ENV);

    assert_eq!(config.unwrap().api_url, "https://from-env.example");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _guard = ENV_LOCK.lock();
    std::env::remove_var(API_URL_ENV);

    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig::load_or_default(dir.path().join("absent.yaml")).unwrap();
    assert_eq!(config.api_url, "http://localhost:8080");

    assert!(matches!(
        DashboardConfig::load(dir.path().join("absent.yaml")),
        Err(ConfigError::FileError(_))
    ));
}

#[test]
fn test_invalid_values_are_rejected() {
    let _guard = ENV_LOCK.lock();
    std::env::remove_var(API_URL_ENV);

    let file = write_config("sync:\n  base_interval_ms: 0\n");
    assert!(matches!(
        DashboardConfig::load(file.path()),
        Err(ConfigError::ValidationError(_))
    ));

    let file = write_config("api_url: [not, a, string]\n");
    assert!(matches!(
        DashboardConfig::load(file.path()),
        Err(ConfigError::YamlError(_))
    ));
}
