//! Domain Layer
//!
//! Entities and records served by the API, plus the feed identities the
//! views poll with. No I/O here.

pub mod entity;
pub mod models;

pub use entity::{Entity, ParseEntityError, ENTITY_OPTIONS};
pub use models::{Holding, InstrumentType, Trade, TradeRow, TradesQuery, DEFAULT_TRADES_LIMIT, MAX_TRADES_LIMIT};
