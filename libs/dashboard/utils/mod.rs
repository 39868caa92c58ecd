//! Common utilities for the dashboard binaries

pub mod format;
mod shutdown;

pub use format::{entity_label, format_price, format_quantity, format_timestamp, from_now};
pub use shutdown::ShutdownSignal;
