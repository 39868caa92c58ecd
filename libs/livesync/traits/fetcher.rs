use super::error::FetchError;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;

/// Trait for retrieving one payload of a feed
///
/// Implementations must be idempotent: the synchronizer calls `fetch`
/// repeatedly for the same identity and never aborts a call once it has
/// started, it only ignores the result when the call has been superseded.
///
/// # Type Parameters
/// - `K`: feed identity, the parameter set that decides what is fetched
/// - `T`: payload type published in the snapshot
#[async_trait]
pub trait Fetcher<K, T>: Send + Sync + 'static {
    /// Fetch the current payload for `identity`
    ///
    /// # Returns
    /// * `Ok(payload)` - stored as the snapshot's data
    /// * `Err(FetchError)` - reported through the snapshot, prior data kept
    async fn fetch(&self, identity: &K) -> Result<T, FetchError>;
}

/// Adapter that turns an async closure into a [`Fetcher`]
///
/// The closure receives an owned clone of the identity so the returned
/// future can be `'static`. Any `Display` error is accepted and reduced to
/// its description.
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<K, T, E, F, Fut> Fetcher<K, T> for FnFetcher<F>
where
    K: Clone + Send + Sync + 'static,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    async fn fetch(&self, identity: &K) -> Result<T, FetchError> {
        (self.f)(identity.clone())
            .await
            .map_err(FetchError::from_display)
    }
}
