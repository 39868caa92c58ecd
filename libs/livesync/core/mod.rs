//! Synchronizer core: configuration, the published snapshot, the schedule
//! state machine and the driver task that ties them together.

pub mod config;
pub(crate) mod schedule;
pub mod snapshot;
pub mod synchronizer;

pub use config::SyncConfig;
pub use snapshot::{Snapshot, Status};
pub use synchronizer::{Synchronizer, SynchronizerBuilder};
