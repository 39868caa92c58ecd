//! Dashboard visualizer
//!
//! Terminal UI for the holdings and trades feeds. Each tab is backed by its
//! own synchronizer; terminal focus plays the role of page visibility.

pub mod app;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::{InputMode, View, VisualizerState};
