//! Application Layer
//!
//! Feeds, pure view derivations and the terminal visualizer.
//! This layer depends on domain and infrastructure layers.

pub mod feeds;
pub mod views;
pub mod visualizer;

pub use feeds::{start_holdings, start_trades, HoldingsFeed, HoldingsSync, TradesFeed, TradesSync};
