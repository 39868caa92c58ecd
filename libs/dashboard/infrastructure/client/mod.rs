//! Holdings API client
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::infrastructure::client::DashboardApiClient;
//! use dashboard::domain::{Entity, TradesQuery};
//!
//! let client = DashboardApiClient::new("http://localhost:8080", Duration::from_secs(10))?;
//!
//! let holdings = client.get_holdings(Entity::Zurich).await?;
//! let trades = client.get_trades(&TradesQuery::new(Entity::All)).await?;
//! ```

mod api;

pub use api::{ApiError, DashboardApiClient, Result};
