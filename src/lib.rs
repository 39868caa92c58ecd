//! Holdings Dashboard - Main Library
//!
//! Live holdings and trades views kept fresh by polling synchronizers.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **dashboard**: Models, API client, views and terminal UI (re-exported from workspace)
//! - **livesync**: Polling synchronizer core (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use holdings_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use holdings_dashboard::dashboard::DashboardConfig;
//! ```

// Re-export workspace libraries for convenience
pub use dashboard;
pub use livesync;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{config_path_from_args, flag_value, load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
