//! Trades view: symbol filter, row labels and the row-count status

use chrono::{DateTime, Utc};
use livesync::Snapshot;

use super::{is_pending, StatusLine, TableBody};
use crate::domain::Trade;
use crate::utils::format::{entity_label, format_price, format_quantity, format_timestamp, from_now};

pub const TRADES_SKELETON_ROWS: usize = 8;

/// Display strings of one trade row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeLine {
    pub trade_id: String,
    pub entity: String,
    pub instrument_type: String,
    pub symbol: String,
    pub quantity: String,
    pub price: String,
    pub timestamp: String,
    pub relative: String,
}

impl TradeLine {
    pub fn new(trade: &Trade, now: &DateTime<Utc>) -> Self {
        Self {
            trade_id: trade.trade_id.clone(),
            entity: entity_label(&trade.entity),
            instrument_type: trade.instrument_type.to_string(),
            symbol: trade.symbol.clone(),
            quantity: format_quantity(trade.quantity),
            price: format_price(trade.price),
            timestamp: format_timestamp(&trade.ts),
            relative: from_now(&trade.ts, now),
        }
    }
}

/// Trades snapshot narrowed by the symbol filter
#[derive(Debug, Clone)]
pub struct TradesView {
    pub rows: Vec<Trade>,
    total: usize,
    pending: bool,
    error_message: Option<String>,
}

impl TradesView {
    pub fn from_snapshot(snapshot: &Snapshot<Vec<Trade>>, symbol_filter: &str) -> Self {
        let all = snapshot.data().map(Vec::as_slice).unwrap_or(&[]);
        Self {
            rows: filter_by_symbol(all, symbol_filter),
            total: all.len(),
            pending: is_pending(snapshot),
            error_message: snapshot.error_message.clone(),
        }
    }

    /// Loading wins over error, otherwise the filtered row count
    pub fn status(&self) -> StatusLine {
        if self.pending {
            StatusLine::Refreshing
        } else if let Some(message) = &self.error_message {
            StatusLine::Error(message.clone())
        } else {
            StatusLine::Rows(self.rows.len())
        }
    }

    /// Skeleton only while nothing has been loaded at all
    pub fn body(&self, now: &DateTime<Utc>) -> TableBody<TradeLine> {
        if self.pending && self.total == 0 {
            TableBody::Skeleton(TRADES_SKELETON_ROWS)
        } else if self.rows.is_empty() {
            TableBody::Empty("No trades yet.".to_string())
        } else {
            TableBody::Rows(self.rows.iter().map(|t| TradeLine::new(t, now)).collect())
        }
    }
}

/// Case-insensitive substring match on the symbol, blank filter keeps all
pub fn filter_by_symbol(trades: &[Trade], filter: &str) -> Vec<Trade> {
    let needle = filter.trim().to_uppercase();
    if needle.is_empty() {
        return trades.to_vec();
    }
    trades
        .iter()
        .filter(|t| t.symbol.to_uppercase().contains(&needle))
        .cloned()
        .collect()
}
