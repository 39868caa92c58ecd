//! Holdings view: grouping by instrument type and quick stats

use livesync::Snapshot;

use super::{is_pending, StatusLine, TableBody};
use crate::domain::{Holding, InstrumentType};

pub const HOLDINGS_SKELETON_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldingsStats {
    pub positions: usize,
    pub stocks: usize,
    pub crypto: usize,
}

/// Holdings snapshot split per instrument type
#[derive(Debug, Clone)]
pub struct HoldingsView {
    pub stocks: Vec<Holding>,
    pub crypto: Vec<Holding>,
    pending: bool,
    status: StatusLine,
}

impl HoldingsView {
    pub fn from_snapshot(snapshot: &Snapshot<Vec<Holding>>) -> Self {
        let (stocks, crypto) = group_by_type(snapshot.data().map(Vec::as_slice).unwrap_or(&[]));
        Self {
            stocks,
            crypto,
            pending: is_pending(snapshot),
            status: status_line(snapshot),
        }
    }

    pub fn stats(&self) -> HoldingsStats {
        HoldingsStats {
            positions: self.stocks.len() + self.crypto.len(),
            stocks: self.stocks.len(),
            crypto: self.crypto.len(),
        }
    }

    pub fn group(&self, instrument_type: InstrumentType) -> &[Holding] {
        match instrument_type {
            InstrumentType::Stock => &self.stocks,
            InstrumentType::Crypto => &self.crypto,
        }
    }

    /// Skeleton while loading an empty group, otherwise rows or the empty note
    pub fn body(&self, instrument_type: InstrumentType) -> TableBody<Holding> {
        let items = self.group(instrument_type);
        if self.pending && items.is_empty() {
            TableBody::Skeleton(HOLDINGS_SKELETON_ROWS)
        } else if items.is_empty() {
            TableBody::Empty(format!("No {} holdings yet.", instrument_type))
        } else {
            TableBody::Rows(items.to_vec())
        }
    }

    pub fn status(&self) -> StatusLine {
        self.status.clone()
    }
}

/// Split holdings into (stocks, crypto), preserving API order
pub fn group_by_type(holdings: &[Holding]) -> (Vec<Holding>, Vec<Holding>) {
    holdings
        .iter()
        .cloned()
        .partition(|h| h.instrument_type == InstrumentType::Stock)
}

/// Error wins over loading for the holdings header
pub fn status_line<T>(snapshot: &Snapshot<T>) -> StatusLine {
    if let Some(message) = &snapshot.error_message {
        StatusLine::Error(message.clone())
    } else if is_pending(snapshot) {
        StatusLine::Refreshing
    } else {
        StatusLine::Live
    }
}
