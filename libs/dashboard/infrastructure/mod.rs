//! Infrastructure Layer
//!
//! HTTP client, configuration and logging setup.

pub mod client;
pub mod config;
pub mod logging;

pub use client::{ApiError, DashboardApiClient};
pub use config::{ConfigError, DashboardConfig};
pub use logging::{init_file_tracing, init_tracing_with_level};
