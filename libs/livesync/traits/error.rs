use std::fmt;
use thiserror::Error;

/// Errors raised by the synchronizer itself
///
/// Fetch failures never surface through this type at runtime; they are
/// absorbed into the published snapshot. It exists for configuration checks
/// and for callers that want to report a failure description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A fetch settled with a failure
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Failure of a single fetch attempt
///
/// Only the human-readable description is kept, that is all a snapshot
/// carries to the rendering side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Failed to load".to_string()
        } else {
            message
        };
        Self { message }
    }

    /// Build from any displayable error
    pub fn from_display(err: impl fmt::Display) -> Self {
        Self::new(err.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<FetchError> for SyncError {
    fn from(err: FetchError) -> Self {
        SyncError::Fetch(err.into_message())
    }
}
