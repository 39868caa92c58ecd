//! Feed Watch - headless synchronizer that logs every snapshot transition
//!
//! Usage:
//!   feed-watch [--trades] [--entity zurich|new_york|all] [--config path]
//!   feed-watch --check

use std::fmt::Debug;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use holdings_dashboard::bin_common::{config_path_from_args, flag_value, parse_args, BinaryRunner, RunConfig};
use holdings_dashboard::dashboard::{
    init_tracing_with_level, DashboardApiClient, DashboardConfig, Entity, HoldingsFeed,
    ShutdownSignal, TradesFeed, TradesQuery,
};
use holdings_dashboard::livesync::{AlwaysVisible, Snapshot, Status, Synchronizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedKind {
    Holdings,
    Trades,
}

struct FeedWatchApp {
    run_config: RunConfig,
    config: DashboardConfig,
    client: DashboardApiClient,
    kind: FeedKind,
    entity: Entity,
    shutdown: ShutdownSignal,
}

impl FeedWatchApp {
    fn new(config: DashboardConfig, kind: FeedKind, entity: Entity) -> Result<Self> {
        let client = DashboardApiClient::new(&config.api_url, config.request_timeout())?;
        Ok(Self {
            run_config: RunConfig::new("Feed Watch"),
            config,
            client,
            kind,
            entity,
            shutdown: ShutdownSignal::new(),
        })
    }

    async fn watch<K, T>(&self, sync: Synchronizer<K, Vec<T>>) -> Result<()>
    where
        K: Clone + PartialEq + Debug + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        let mut updates = sync.subscribe();
        let mut summary = tokio::time::interval(self.run_config.summary_interval());
        summary.tick().await;
        let mut last_status = Status::Idle;

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    log_transition(sync.name(), last_status, &snapshot);
                    last_status = snapshot.status;
                }
                _ = summary.tick() => {
                    let snapshot = sync.snapshot();
                    info!(
                        "[{}] Still watching {:?}: {} ({} rows)",
                        sync.name(),
                        sync.identity(),
                        snapshot.status,
                        snapshot.data().map(Vec::len).unwrap_or(0)
                    );
                }
                _ = self.shutdown.wait() => {
                    break;
                }
            }
        }

        sync.shutdown().await;
        Ok(())
    }
}

impl BinaryRunner for FeedWatchApp {
    async fn run(&mut self) -> Result<()> {
        self.shutdown.spawn_signal_handler();

        match self.kind {
            FeedKind::Holdings => {
                let sync = HoldingsFeed::new(self.client.clone()).start(
                    self.config.sync,
                    &AlwaysVisible,
                    self.entity,
                );
                self.watch(sync).await
            }
            FeedKind::Trades => {
                let query = TradesQuery::new(self.entity).with_limit(self.config.trades_limit);
                let sync = TradesFeed::new(self.client.clone()).start(
                    self.config.sync,
                    &AlwaysVisible,
                    query,
                );
                self.watch(sync).await
            }
        }
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}

fn log_transition<T>(name: &str, previous: Status, snapshot: &Snapshot<Vec<T>>) {
    let rows = snapshot.data().map(Vec::len).unwrap_or(0);
    match snapshot.status {
        Status::Error => warn!(
            "[{}] {} -> error: {} (keeping {} rows)",
            name,
            previous,
            snapshot.error_message.as_deref().unwrap_or("unknown"),
            rows
        ),
        status => info!("[{}] {} -> {} ({} rows)", name, previous, status, rows),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = parse_args();
    let config = DashboardConfig::load_or_default(config_path_from_args(&args))?;

    init_tracing_with_level(&config.log_level);
    config.log();

    if args.iter().any(|a| a == "--check") {
        let client = DashboardApiClient::new(&config.api_url, config.request_timeout())?;
        return match client.health().await {
            Ok(true) => {
                info!("API at {} is healthy", config.api_url);
                Ok(())
            }
            Ok(false) => Err(anyhow!("API at {} reported unhealthy", config.api_url)),
            Err(e) => Err(anyhow!("Health check failed: {}", e)),
        };
    }

    let kind = if args.iter().any(|a| a == "--trades") {
        FeedKind::Trades
    } else {
        FeedKind::Holdings
    };
    let entity: Entity = flag_value(&args, "--entity").unwrap_or("all").parse()?;

    let mut app = FeedWatchApp::new(config, kind, entity)?;
    app.execute().await
}
