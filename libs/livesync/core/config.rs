use crate::traits::SyncError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default poll interval of the dashboard views
pub const DEFAULT_BASE_INTERVAL_MS: u64 = 5_000;

/// Default upper bound of the random delay added to every poll
pub const DEFAULT_JITTER_WINDOW_MS: u64 = 500;

/// Timing policy of one synchronizer
///
/// Every delay between two fires is `base_interval + uniform(0, jitter_window)`.
/// There is no backoff: a failing feed is retried at the same cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_base_interval_ms")]
    pub base_interval_ms: u64,
    #[serde(default = "default_jitter_window_ms")]
    pub jitter_window_ms: u64,
}

fn default_base_interval_ms() -> u64 {
    DEFAULT_BASE_INTERVAL_MS
}

fn default_jitter_window_ms() -> u64 {
    DEFAULT_JITTER_WINDOW_MS
}

impl SyncConfig {
    /// Create a config with the given base interval and the default jitter window
    pub fn new(base_interval: Duration) -> Self {
        Self {
            base_interval_ms: base_interval.as_millis() as u64,
            jitter_window_ms: DEFAULT_JITTER_WINDOW_MS,
        }
    }

    /// Set the jitter window
    pub fn with_jitter_window(mut self, window: Duration) -> Self {
        self.jitter_window_ms = window.as_millis() as u64;
        self
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn jitter_window(&self) -> Duration {
        Duration::from_millis(self.jitter_window_ms)
    }

    /// Largest delay the schedule can ever pick
    pub fn max_delay(&self) -> Duration {
        self.base_interval() + self.jitter_window()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.base_interval_ms == 0 {
            return Err(SyncError::Configuration(
                "base_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
            jitter_window_ms: DEFAULT_JITTER_WINDOW_MS,
        }
    }
}
