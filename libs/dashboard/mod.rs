//! Holdings Dashboard
//!
//! Live holdings and trades tables fed by polling the trades-aggregator API.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export commonly used items
pub use application::{
    feeds::{HoldingsFeed, TradesFeed},
    visualizer::{App, View},
};
pub use domain::{Entity, Holding, InstrumentType, Trade, TradesQuery};
pub use infrastructure::{init_tracing_with_level, ApiError, DashboardApiClient, DashboardConfig};
pub use utils::ShutdownSignal;
