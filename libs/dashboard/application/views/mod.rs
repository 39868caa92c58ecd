//! Presentation data derived from feed snapshots
//!
//! Everything here is a pure function of a [`Snapshot`] plus view-local
//! input (the symbol filter), so the terminal widgets stay thin.

pub mod holdings;
pub mod trades;

use livesync::{Snapshot, Status};

pub use holdings::{HoldingsStats, HoldingsView, HOLDINGS_SKELETON_ROWS};
pub use trades::{TradeLine, TradesView, TRADES_SKELETON_ROWS};

/// One-line feed status shown next to a view title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Error(String),
    Refreshing,
    Live,
    /// Row count, trades view only
    Rows(usize),
}

impl StatusLine {
    pub fn text(&self) -> String {
        match self {
            StatusLine::Error(message) => format!("Error: {}", message),
            StatusLine::Refreshing => "Refreshing…".to_string(),
            StatusLine::Live => "Live".to_string(),
            StatusLine::Rows(count) => row_count_label(*count),
        }
    }
}

/// What a table renders in its body
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<R> {
    /// Placeholder rows while the first payload is loading
    Skeleton(usize),
    Empty(String),
    Rows(Vec<R>),
}

/// `1 row`, `3 rows`
pub fn row_count_label(count: usize) -> String {
    if count == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", count)
    }
}

/// A fetch is outstanding or about to start
pub fn is_pending<T>(snapshot: &Snapshot<T>) -> bool {
    matches!(snapshot.status, Status::Idle | Status::Loading)
}
