//! # LiveSync
//!
//! Keeps a single logical data feed fresh by driving a fetch function on a
//! jittered timer and publishing the outcome as a [`Snapshot`].
//!
//! ## Features
//!
//! - **Immediate first fire**: the first fetch starts as soon as the
//!   synchronizer does, later fetches follow `base_interval + jitter`
//! - **No overlap**: at most one fetch per generation is outstanding, the next
//!   timer is armed only after it settles
//! - **Stale-on-error**: failures keep the last good payload and only flip the
//!   status to `Error`
//! - **Generations**: identity changes and `stop()` bump a generation counter,
//!   settlements from an older generation are ignored
//! - **Visibility gating**: a hidden view cancels its timer, becoming visible
//!   again fires immediately
//!
//! ## Example
//!
//! ```rust,ignore
//! use livesync::{FnFetcher, SyncConfig, Synchronizer, VisibilityController};
//!
//! let visibility = VisibilityController::new(true);
//! let sync = Synchronizer::builder(FnFetcher::new(|entity: String| async move {
//!         client.get_holdings(&entity).await
//!     }))
//!     .name("holdings")
//!     .config(SyncConfig::default())
//!     .visibility(&visibility)
//!     .start("zurich".to_string());
//!
//! let mut updates = sync.subscribe();
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow_and_update().clone();
//!     println!("{:?}", snapshot.status);
//! }
//! ```

pub mod core;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core functionality
pub use core::{
    config::SyncConfig,
    snapshot::{Snapshot, Status},
    synchronizer::{Synchronizer, SynchronizerBuilder},
};

/// Type alias for Result with SyncError
pub type Result<T> = std::result::Result<T, traits::SyncError>;
