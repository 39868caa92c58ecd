//! UI-local state of the dashboard

use crate::domain::Entity;

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Holdings,
    Trades,
}

impl View {
    pub const ALL: [View; 2] = [View::Holdings, View::Trades];

    pub fn title(&self) -> &'static str {
        match self {
            View::Holdings => "Holdings",
            View::Trades => "Trades",
        }
    }

    pub fn next(&self) -> View {
        match self {
            View::Holdings => View::Trades,
            View::Trades => View::Holdings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes go to the trades symbol filter
    EditingFilter,
}

/// Selections made in the UI, independent of any feed
#[derive(Debug, Clone, Default)]
pub struct VisualizerState {
    pub active_view: View,
    pub holdings_entity: Entity,
    pub trades_entity: Entity,
    pub symbol_filter: String,
    pub input_mode: InputMode,
    /// Terminal focus, stands in for page visibility
    pub focused: bool,
}

impl VisualizerState {
    pub fn new() -> Self {
        Self {
            focused: true,
            ..Default::default()
        }
    }

    /// A view is observed when the terminal has focus and its tab is active
    pub fn is_visible(&self, view: View) -> bool {
        self.focused && self.active_view == view
    }

    pub fn entity(&self, view: View) -> Entity {
        match view {
            View::Holdings => self.holdings_entity,
            View::Trades => self.trades_entity,
        }
    }
}
