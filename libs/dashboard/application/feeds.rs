//! API-backed fetchers for the two dashboard feeds

use async_trait::async_trait;
use livesync::{FetchError, Fetcher, SyncConfig, Synchronizer, VisibilitySource};

use crate::domain::{Entity, Holding, Trade, TradesQuery};
use crate::infrastructure::{ApiError, DashboardApiClient};

pub type HoldingsSync = Synchronizer<Entity, Vec<Holding>>;
pub type TradesSync = Synchronizer<TradesQuery, Vec<Trade>>;

fn to_fetch_error(err: ApiError) -> FetchError {
    FetchError::new(err.description())
}

/// Start the holdings feed with any fetcher
pub fn start_holdings(
    fetcher: impl Fetcher<Entity, Vec<Holding>>,
    config: SyncConfig,
    visibility: &dyn VisibilitySource,
    entity: Entity,
) -> HoldingsSync {
    Synchronizer::builder(fetcher)
        .name("holdings")
        .config(config)
        .visibility(visibility)
        .start(entity)
}

/// Start the trades feed with any fetcher
pub fn start_trades(
    fetcher: impl Fetcher<TradesQuery, Vec<Trade>>,
    config: SyncConfig,
    visibility: &dyn VisibilitySource,
    query: TradesQuery,
) -> TradesSync {
    Synchronizer::builder(fetcher)
        .name("trades")
        .config(config)
        .visibility(visibility)
        .start(query)
}

/// Holdings per entity, `Entity::All` aggregates across entities
#[derive(Debug, Clone)]
pub struct HoldingsFeed {
    client: DashboardApiClient,
}

impl HoldingsFeed {
    pub fn new(client: DashboardApiClient) -> Self {
        Self { client }
    }

    /// Start a holdings synchronizer gated by `visibility`
    pub fn start(
        self,
        config: SyncConfig,
        visibility: &dyn VisibilitySource,
        entity: Entity,
    ) -> HoldingsSync {
        start_holdings(self, config, visibility, entity)
    }
}

#[async_trait]
impl Fetcher<Entity, Vec<Holding>> for HoldingsFeed {
    async fn fetch(&self, entity: &Entity) -> Result<Vec<Holding>, FetchError> {
        self.client.get_holdings(*entity).await.map_err(to_fetch_error)
    }
}

/// Most recent trades for a [`TradesQuery`]
#[derive(Debug, Clone)]
pub struct TradesFeed {
    client: DashboardApiClient,
}

impl TradesFeed {
    pub fn new(client: DashboardApiClient) -> Self {
        Self { client }
    }

    /// Start a trades synchronizer gated by `visibility`
    pub fn start(
        self,
        config: SyncConfig,
        visibility: &dyn VisibilitySource,
        query: TradesQuery,
    ) -> TradesSync {
        start_trades(self, config, visibility, query)
    }
}

#[async_trait]
impl Fetcher<TradesQuery, Vec<Trade>> for TradesFeed {
    async fn fetch(&self, query: &TradesQuery) -> Result<Vec<Trade>, FetchError> {
        self.client.get_trades(query).await.map_err(to_fetch_error)
    }
}
