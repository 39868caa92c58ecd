//! Main application state and logic for the dashboard

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use livesync::{Fetcher, Snapshot, VisibilityController};
use tracing::info;

use super::state::{InputMode, View, VisualizerState};
use crate::application::feeds::{
    start_holdings, start_trades, HoldingsFeed, HoldingsSync, TradesFeed, TradesSync,
};
use crate::application::views::{HoldingsView, TradesView};
use crate::domain::{Entity, Holding, Trade, TradesQuery};
use crate::infrastructure::{DashboardApiClient, DashboardConfig};

/// Main application state
///
/// Owns one synchronizer per view. Each view gets its own visibility
/// controller so only the active tab of a focused terminal polls.
pub struct App {
    holdings: HoldingsSync,
    trades: TradesSync,
    holdings_visibility: VisibilityController,
    trades_visibility: VisibilityController,
    /// Tab, entity and filter selections
    pub state: VisualizerState,
    trades_limit: u16,
    /// API base URL shown in the header
    pub api_url: String,
    /// Whether to quit
    pub should_quit: bool,
    /// Status message to show in footer
    pub status_message: Option<String>,
}

impl App {
    /// Build the API client and start both feeds
    ///
    /// Must be called from within a tokio runtime context.
    pub fn initialize(config: &DashboardConfig) -> Result<Self> {
        info!("[Dashboard] Connecting to {}", config.api_url);
        let client = DashboardApiClient::new(&config.api_url, config.request_timeout())?;

        Ok(Self::new(
            HoldingsFeed::new(client.clone()),
            TradesFeed::new(client),
            config,
        ))
    }

    /// Start both feeds with arbitrary fetchers
    pub fn new(
        holdings_fetcher: impl Fetcher<Entity, Vec<Holding>>,
        trades_fetcher: impl Fetcher<TradesQuery, Vec<Trade>>,
        config: &DashboardConfig,
    ) -> Self {
        let state = VisualizerState::new();
        let holdings_visibility = VisibilityController::new(state.is_visible(View::Holdings));
        let trades_visibility = VisibilityController::new(state.is_visible(View::Trades));

        let holdings = start_holdings(
            holdings_fetcher,
            config.sync,
            &holdings_visibility,
            state.holdings_entity,
        );
        let trades = start_trades(
            trades_fetcher,
            config.sync,
            &trades_visibility,
            TradesQuery::new(state.trades_entity).with_limit(config.trades_limit),
        );

        Self {
            holdings,
            trades,
            holdings_visibility,
            trades_visibility,
            state,
            trades_limit: config.trades_limit,
            api_url: config.api_url.clone(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Dispatch a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state.input_mode {
            InputMode::EditingFilter => match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.state.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    self.state.symbol_filter.pop();
                }
                KeyCode::Char(c) => {
                    self.state.symbol_filter.push(c);
                }
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.switch_view();
                }
                KeyCode::Char('e') => {
                    self.cycle_entity();
                }
                KeyCode::Char('r') => {
                    self.refresh();
                }
                KeyCode::Char('/') if self.state.active_view == View::Trades => {
                    self.state.input_mode = InputMode::EditingFilter;
                }
                KeyCode::Esc => {
                    self.state.symbol_filter.clear();
                    self.status_message = None;
                }
                _ => {}
            },
        }
    }

    /// Terminal focus changed
    pub fn set_focus(&mut self, focused: bool) {
        self.state.focused = focused;
        self.sync_visibility();
    }

    pub fn switch_view(&mut self) {
        self.state.active_view = self.state.active_view.next();
        self.state.input_mode = InputMode::Normal;
        self.status_message = None;
        self.sync_visibility();
    }

    /// Move the active view to the next entity, restarting its feed
    pub fn cycle_entity(&mut self) {
        match self.state.active_view {
            View::Holdings => {
                let entity = self.state.holdings_entity.next();
                self.state.holdings_entity = entity;
                self.holdings.set_identity(entity);
            }
            View::Trades => {
                let entity = self.state.trades_entity.next();
                self.state.trades_entity = entity;
                self.trades
                    .set_identity(TradesQuery::new(entity).with_limit(self.trades_limit));
            }
        }

        let view = self.state.active_view;
        self.status_message = Some(format!(
            "{}: {}",
            view.title(),
            self.state.entity(view).label()
        ));
    }

    /// Manual refresh of the active view
    pub fn refresh(&mut self) {
        match self.state.active_view {
            View::Holdings => self.holdings.refresh(),
            View::Trades => self.trades.refresh(),
        }
        self.status_message = Some(format!("Refreshing {}", self.state.active_view.title()));
    }

    fn sync_visibility(&self) {
        self.holdings_visibility
            .set_visible(self.state.is_visible(View::Holdings));
        self.trades_visibility
            .set_visible(self.state.is_visible(View::Trades));
    }

    pub fn holdings_snapshot(&self) -> Snapshot<Vec<Holding>> {
        self.holdings.snapshot()
    }

    pub fn trades_snapshot(&self) -> Snapshot<Vec<Trade>> {
        self.trades.snapshot()
    }

    pub fn holdings_view(&self) -> HoldingsView {
        HoldingsView::from_snapshot(&self.holdings.snapshot())
    }

    pub fn trades_view(&self) -> TradesView {
        TradesView::from_snapshot(&self.trades.snapshot(), &self.state.symbol_filter)
    }

    /// Stop both feeds
    pub fn shutdown(&mut self) {
        info!("[Dashboard] Shutting down...");
        self.holdings.stop();
        self.trades.stop();
    }
}
