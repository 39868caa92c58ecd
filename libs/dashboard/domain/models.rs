//! Wire models for the holdings API

use super::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trades limit the dashboard asks for
pub const DEFAULT_TRADES_LIMIT: u16 = 200;

/// Upper bound accepted by the API
pub const MAX_TRADES_LIMIT: u16 = 1000;

// =============================================================================
// Instrument type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    Stock,
    Crypto,
}

impl InstrumentType {
    pub const ALL: [InstrumentType; 2] = [InstrumentType::Stock, InstrumentType::Crypto];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Stock => "stock",
            InstrumentType::Crypto => "crypto",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Holding
// =============================================================================

/// Aggregated position of one symbol at one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Entity wire name (`zurich`, `new_york`)
    pub entity: String,
    pub instrument_type: InstrumentType,
    pub symbol: String,
    pub quantity: f64,
}

// =============================================================================
// Trade
// =============================================================================

/// Single executed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    pub entity: String,
    pub instrument_type: InstrumentType,
    pub symbol: String,
    pub quantity: f64,
    /// Absent for trades without a recorded fill price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub ts: DateTime<Utc>,
}

/// A trade row as it may arrive on the wire
///
/// The API encodes rows as objects, older clients expect positional arrays
/// `[trade_id, entity, instrument_type, symbol, quantity, price, ts]`.
/// Both decode into [`Trade`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TradeRow {
    Object(Trade),
    Positional(
        (
            String,
            String,
            InstrumentType,
            String,
            f64,
            Option<f64>,
            DateTime<Utc>,
        ),
    ),
}

impl From<TradeRow> for Trade {
    fn from(row: TradeRow) -> Self {
        match row {
            TradeRow::Object(trade) => trade,
            TradeRow::Positional((trade_id, entity, instrument_type, symbol, quantity, price, ts)) => {
                Trade {
                    trade_id,
                    entity,
                    instrument_type,
                    symbol,
                    quantity,
                    price,
                    ts,
                }
            }
        }
    }
}

// =============================================================================
// Trades query
// =============================================================================

/// Identity of a trades feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TradesQuery {
    pub entity: Entity,
    pub limit: u16,
}

impl TradesQuery {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            limit: DEFAULT_TRADES_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    /// Query parameters for `GET /api/trades`
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        if let Some(entity) = self.entity.filter() {
            params.push(("entity".to_string(), entity.to_string()));
        }
        params
    }
}

impl Default for TradesQuery {
    fn default() -> Self {
        Self::new(Entity::All)
    }
}
