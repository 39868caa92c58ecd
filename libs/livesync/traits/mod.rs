//! Seams of the synchronizer: what to fetch, when the view is observed, and
//! how much randomness to add to each poll interval.

pub mod error;
pub mod fetcher;
pub mod jitter;
pub mod visibility;

pub use error::{FetchError, SyncError};
pub use fetcher::{Fetcher, FnFetcher};
pub use jitter::{FixedJitter, JitterSource, NoJitter, UniformJitter};
pub use visibility::{AlwaysVisible, VisibilityController, VisibilitySource};
