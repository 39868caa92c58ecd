use std::sync::Arc;
use tokio::sync::watch;

/// Trait for the "is this view currently observed" signal
///
/// The synchronizer subscribes once at start and reacts to change
/// notifications; it never polls the source. A closed channel is treated as
/// "no further changes", the last value stays in effect.
pub trait VisibilitySource: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// Source for headless consumers, always visible and never changes
///
/// With it the synchronizer degrades to plain fixed-interval polling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl VisibilitySource for AlwaysVisible {
    fn subscribe(&self) -> watch::Receiver<bool> {
        let (_tx, rx) = watch::channel(true);
        rx
    }
}

/// Manually driven visibility flag
///
/// The terminal dashboard feeds it from focus events and view switches;
/// tests use it to hide and show a view. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct VisibilityController {
    tx: Arc<watch::Sender<bool>>,
}

impl VisibilityController {
    pub fn new(visible: bool) -> Self {
        let (tx, _rx) = watch::channel(visible);
        Self { tx: Arc::new(tx) }
    }

    /// Update the flag, subscribers are only notified on an actual change
    pub fn set_visible(&self, visible: bool) {
        self.tx.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        });
    }

    pub fn show(&self) {
        self.set_visible(true);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }

    pub fn is_visible(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VisibilitySource for VisibilityController {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
