//! Published state of a feed

use crate::traits::FetchError;
use std::fmt;

/// Fetch status of a feed, independent of whether stale data is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing has been requested yet for the current identity
    #[default]
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The last fetch succeeded
    Ready,
    /// The last fetch failed, see `error_message`
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Ready => "ready",
            Status::Error => "error",
        };
        f.write_str(label)
    }
}

/// Latest published state of a feed
///
/// `data` is the last successful payload for the current identity and is
/// only cleared when the identity changes. A failed fetch leaves it in place
/// so the view keeps showing the last known good state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub status: Status,
    pub error_message: Option<String>,
    /// Generation the snapshot belongs to
    pub generation: u64,
}

impl<T> Snapshot<T> {
    /// Empty snapshot for a fresh identity
    pub fn empty(generation: u64) -> Self {
        Self {
            data: None,
            status: Status::Idle,
            error_message: None,
            generation,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Loading with nothing to show yet, the case for skeleton rows
    pub fn is_first_load(&self) -> bool {
        self.status == Status::Loading && self.data.is_none()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.status = Status::Loading;
        self.error_message = None;
    }

    pub(crate) fn settle(&mut self, result: Result<T, FetchError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = Status::Ready;
                self.error_message = None;
            }
            Err(err) => {
                self.status = Status::Error;
                self.error_message = Some(err.into_message());
            }
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_keeps_data() {
        let mut snapshot = Snapshot::empty(1);
        snapshot.settle(Ok(vec![1, 2, 3]));
        snapshot.begin_fetch();

        assert!(snapshot.is_loading());
        assert!(!snapshot.is_first_load());
        assert_eq!(snapshot.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_failure_keeps_last_good_payload() {
        let mut snapshot = Snapshot::empty(1);
        snapshot.settle(Ok("P"));
        snapshot.begin_fetch();
        snapshot.settle(Err(FetchError::new("503 Service Unavailable")));

        assert_eq!(snapshot.data, Some("P"));
        assert_eq!(snapshot.status, Status::Error);
        assert_eq!(snapshot.error_message.as_deref(), Some("503 Service Unavailable"));
    }

    #[test]
    fn test_success_clears_error() {
        let mut snapshot: Snapshot<u32> = Snapshot::empty(3);
        snapshot.begin_fetch();
        assert!(snapshot.is_first_load());
        snapshot.settle(Err(FetchError::new("timeout")));
        snapshot.begin_fetch();
        snapshot.settle(Ok(9));

        assert_eq!(snapshot.status, Status::Ready);
        assert!(snapshot.error_message.is_none());
        assert_eq!(snapshot.generation, 3);
    }
}
