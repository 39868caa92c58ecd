//! Process shutdown signal shared by the binaries

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::info;

/// Cloneable shutdown flag that can also be awaited
#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                triggered: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Spawn a Ctrl+C handler that triggers shutdown
    pub fn spawn_signal_handler(&self) {
        let signal_handle = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal (Ctrl+C)");
                signal_handle.trigger();
            }
        });
    }

    /// Request shutdown, later calls are no-ops
    pub fn trigger(&self) {
        if !self.inner.triggered.swap(true, Ordering::AcqRel) {
            info!("Shutting down gracefully...");
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.inner.triggered.load(Ordering::Acquire)
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if !self.is_running() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
