//! Recurring-fetch driver
//!
//! One [`Synchronizer`] owns the lifecycle of one feed. The handle is cheap
//! and synchronous; it only moves the generation forward (and resets the
//! snapshot on identity changes). Scheduling happens inside a single driver
//! task that selects over commands, visibility changes, the armed timer and
//! fetch settlements. Fetches run in their own tasks and report back tagged with
//! the generation that started them, so a superseded fetch is never aborted,
//! only ignored.

use super::config::SyncConfig;
use super::schedule::Schedule;
use super::snapshot::Snapshot;
use crate::traits::*;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Internal command messages from the handle to the driver
#[derive(Debug)]
enum Command<K> {
    /// Fire immediately, outside the regular schedule
    Refresh,
    /// Switch to a new feed identity
    SetIdentity { identity: K, generation: u64 },
    /// Stop the driver
    Stop,
}

/// Outcome of one fetch, tagged with its generation
type Settlement<T> = (u64, Result<T, FetchError>);

/// State shared between the handle and the driver
///
/// The handle bumps the generation synchronously on `stop()` and identity
/// changes while holding the snapshot lock. The driver compares generations
/// under the same lock before publishing, so a settlement that races the
/// command is rejected.
struct Shared {
    generation: AtomicU64,
    stopped: AtomicBool,
}

impl Shared {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(1),
            stopped: AtomicBool::new(false),
        }
    }

    #[inline]
    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Increment the generation, returns the new value
    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Keeps one data feed fresh
///
/// Created by [`Synchronizer::start`] or [`Synchronizer::builder`]; must be
/// started from within a tokio runtime. Dropping the handle stops the feed.
///
/// # Type Parameters
/// - `K`: feed identity
/// - `T`: payload type
pub struct Synchronizer<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    name: Arc<str>,
    identity: K,
    shared: Arc<Shared>,
    command_tx: mpsc::UnboundedSender<Command<K>>,
    snapshot_tx: Arc<watch::Sender<Snapshot<T>>>,
    snapshot_rx: watch::Receiver<Snapshot<T>>,
    task_handle: Option<JoinHandle<()>>,
}

impl<K, T> Synchronizer<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create a builder for a synchronizer driven by `fetcher`
    pub fn builder(fetcher: impl Fetcher<K, T>) -> SynchronizerBuilder<K, T> {
        SynchronizerBuilder::new(fetcher)
    }

    /// Start polling `identity` with the given timing policy
    ///
    /// Fires the first fetch immediately. The view is treated as always
    /// visible; use the builder to attach a visibility source.
    pub fn start(fetcher: impl Fetcher<K, T>, config: SyncConfig, identity: K) -> Self {
        Self::builder(fetcher).config(config).start(identity)
    }

    /// Trigger an out-of-band fetch
    ///
    /// Shares the in-flight guard with scheduled fires: while a fetch is
    /// outstanding the request is folded into it. The next regular fire is
    /// scheduled relative to this fetch's settlement. No-op after `stop()`.
    pub fn refresh(&self) {
        if self.shared.is_stopped() {
            debug!("[Sync:{}] Refresh ignored, synchronizer stopped", self.name);
            return;
        }
        let _ = self.command_tx.send(Command::Refresh);
    }

    /// Switch to a new feed identity
    ///
    /// Restarts the schedule from zero: outstanding results for the old
    /// identity are discarded, the snapshot is reset to empty before this
    /// returns and a fetch for the new identity fires immediately. Setting
    /// the current identity again is a no-op, as is any call after `stop()`.
    pub fn set_identity(&mut self, identity: K) {
        if self.shared.is_stopped() {
            debug!("[Sync:{}] Identity change ignored, synchronizer stopped", self.name);
            return;
        }
        if identity == self.identity {
            return;
        }

        let shared = &self.shared;
        let mut generation = 0;
        self.snapshot_tx.send_modify(|snapshot| {
            generation = shared.bump();
            *snapshot = Snapshot::empty(generation);
        });
        self.identity = identity.clone();
        let _ = self
            .command_tx
            .send(Command::SetIdentity { identity, generation });
    }

    /// Cancel the pending timer and make the synchronizer inert
    ///
    /// Safe to call any number of times. A fetch that is already on the
    /// wire keeps running, its result is ignored.
    pub fn stop(&self) {
        if self.shared.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        // Content stays as is, only the generation moves under the lock
        self.snapshot_tx.send_if_modified(|_| {
            self.shared.bump();
            false
        });
        let _ = self.command_tx.send(Command::Stop);
        info!("[Sync:{}] Stopped", self.name);
    }

    /// Stop and wait for the driver task to exit
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot_rx.borrow().clone()
    }

    /// Change stream of snapshots
    ///
    /// The receiver keeps returning the last snapshot after the synchronizer
    /// is shut down or dropped; `changed()` then reports the closed channel.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot_rx.clone()
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.shared.generation()
    }

    pub fn identity(&self) -> &K {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<K, T> Drop for Synchronizer<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// Builder for [`Synchronizer`]
///
/// Only the fetcher and the identity are required; timing defaults to
/// [`SyncConfig::default`], visibility to [`AlwaysVisible`] and jitter to
/// [`UniformJitter`].
pub struct SynchronizerBuilder<K, T> {
    fetcher: Arc<dyn Fetcher<K, T>>,
    config: SyncConfig,
    visibility: Option<watch::Receiver<bool>>,
    jitter: Arc<dyn JitterSource>,
    name: String,
}

impl<K, T> SynchronizerBuilder<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(fetcher: impl Fetcher<K, T>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: SyncConfig::default(),
            visibility: None,
            jitter: Arc::new(UniformJitter),
            name: "feed".to_string(),
        }
    }

    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the base interval
    pub fn base_interval(mut self, interval: Duration) -> Self {
        self.config.base_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Subscribe to a visibility source
    pub fn visibility(mut self, source: &dyn VisibilitySource) -> Self {
        self.visibility = Some(source.subscribe());
        self
    }

    pub fn jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Arc::new(jitter);
        self
    }

    /// Name used as the log prefix
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Spawn the driver task and fire the first fetch for `identity`
    pub fn start(self, identity: K) -> Synchronizer<K, T> {
        let name: Arc<str> = Arc::from(self.name);
        let shared = Arc::new(Shared::new());
        let generation = shared.generation();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::empty(generation));
        let snapshot_tx = Arc::new(snapshot_tx);

        let visibility = self.visibility.unwrap_or_else(|| AlwaysVisible.subscribe());
        let visible = *visibility.borrow();

        info!(
            "[Sync:{}] Starting for {:?} (interval {:?}, jitter window {:?})",
            name,
            identity,
            self.config.base_interval(),
            self.config.jitter_window()
        );

        let driver = Driver {
            name: Arc::clone(&name),
            identity: identity.clone(),
            fetcher: self.fetcher,
            config: self.config,
            jitter: self.jitter,
            shared: Arc::clone(&shared),
            schedule: Schedule::new(generation, visible),
            snapshot_tx: Arc::clone(&snapshot_tx),
            command_rx,
            settle_tx,
            settle_rx,
            visibility,
            visibility_open: true,
        };

        let task_handle = tokio::spawn(driver.run());

        Synchronizer {
            name,
            identity,
            shared,
            command_tx,
            snapshot_tx,
            snapshot_rx,
            task_handle: Some(task_handle),
        }
    }
}

/// Driver task state, owns the schedule and shares the snapshot sender
struct Driver<K, T> {
    name: Arc<str>,
    identity: K,
    fetcher: Arc<dyn Fetcher<K, T>>,
    config: SyncConfig,
    jitter: Arc<dyn JitterSource>,
    shared: Arc<Shared>,
    schedule: Schedule,
    snapshot_tx: Arc<watch::Sender<Snapshot<T>>>,
    command_rx: mpsc::UnboundedReceiver<Command<K>>,
    settle_tx: mpsc::UnboundedSender<Settlement<T>>,
    settle_rx: mpsc::UnboundedReceiver<Settlement<T>>,
    visibility: watch::Receiver<bool>,
    visibility_open: bool,
}

impl<K, T> Driver<K, T>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    async fn run(mut self) {
        self.fire("start");

        loop {
            if self.shared.is_stopped() {
                debug!("[Sync:{}] Stop flag set, exiting driver", self.name);
                break;
            }

            let deadline = self.schedule.deadline();

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Refresh) => self.fire("refresh"),
                    Some(Command::SetIdentity { identity, generation }) => {
                        self.switch_identity(identity, generation)
                    }
                    Some(Command::Stop) | None => break,
                },
                Some((generation, result)) = self.settle_rx.recv() => {
                    self.settle(generation, result);
                }
                changed = self.visibility.changed(), if self.visibility_open => match changed {
                    Ok(()) => {
                        let visible = *self.visibility.borrow_and_update();
                        self.on_visibility(visible);
                    }
                    Err(_) => {
                        debug!("[Sync:{}] Visibility source closed", self.name);
                        self.visibility_open = false;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if self.schedule.take_due() {
                        self.fire("timer");
                    }
                }
            }
        }

        debug!("[Sync:{}] Driver exiting", self.name);
    }

    /// Whether the handle has moved past the driver's generation
    fn is_superseded(&self) -> bool {
        self.shared.is_stopped() || self.shared.generation() != self.schedule.generation()
    }

    /// Start a fetch for the current identity unless one is outstanding
    fn fire(&mut self, reason: &'static str) {
        if self.is_superseded() {
            debug!("[Sync:{}] Skipping {} fire, generation superseded", self.name, reason);
            return;
        }

        let Some(generation) = self.schedule.begin_fetch() else {
            debug!(
                "[Sync:{}] Fetch already in flight, {} fire folded into it",
                self.name, reason
            );
            return;
        };

        if !self.publish(generation, |snapshot| snapshot.begin_fetch()) {
            // A pending command moves the schedule on and clears the slot
            debug!("[Sync:{}] Generation {} superseded before fetching", self.name, generation);
            return;
        }
        debug!(
            "[Sync:{}] Fetching {:?} (generation {}, {})",
            self.name, self.identity, generation, reason
        );

        let fetcher = Arc::clone(&self.fetcher);
        let identity = self.identity.clone();
        let settle_tx = self.settle_tx.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch(&identity).await;
            // The driver may be gone already, the result is then irrelevant
            let _ = settle_tx.send((generation, result));
        });
    }

    /// Apply a fetch outcome and arm the next regular fire
    fn settle(&mut self, generation: u64, result: Result<T, FetchError>) {
        let failure = result.as_ref().err().map(ToString::to_string);
        let current = self.schedule.settle(generation);
        if !current || !self.publish(generation, |snapshot| snapshot.settle(result)) {
            debug!(
                "[Sync:{}] Discarding result of generation {} (current {})",
                self.name,
                generation,
                self.shared.generation()
            );
            return;
        }

        match failure {
            None => debug!("[Sync:{}] Fetch settled", self.name),
            Some(err) => warn!("[Sync:{}] Fetch failed: {}", self.name, err),
        }

        let delay = self.next_delay();
        match self.schedule.arm(Instant::now(), delay) {
            Some(_) => debug!("[Sync:{}] Next fire in {:?}", self.name, delay),
            None => debug!("[Sync:{}] Hidden, no timer armed", self.name),
        }
    }

    /// Apply `modify` unless `generation` was superseded
    ///
    /// The check runs under the snapshot lock, the same lock the handle holds
    /// while bumping the generation.
    fn publish(&self, generation: u64, modify: impl FnOnce(&mut Snapshot<T>)) -> bool {
        let shared = &self.shared;
        self.snapshot_tx.send_if_modified(|snapshot| {
            if shared.is_stopped() || shared.generation() != generation {
                return false;
            }
            modify(snapshot);
            true
        })
    }

    fn on_visibility(&mut self, visible: bool) {
        if visible {
            if self.schedule.show() {
                debug!("[Sync:{}] Visible again, firing immediately", self.name);
                self.fire("visible");
            }
        } else if self.schedule.hide() {
            debug!("[Sync:{}] Hidden, pending timer cancelled", self.name);
        }
    }

    fn switch_identity(&mut self, identity: K, generation: u64) {
        self.identity = identity;
        self.schedule.advance(generation);

        if self.is_superseded() {
            debug!(
                "[Sync:{}] Identity change to generation {} already superseded",
                self.name, generation
            );
            return;
        }

        info!("[Sync:{}] Feed identity changed to {:?}", self.name, self.identity);
        self.fire("identity");
    }

    fn next_delay(&self) -> Duration {
        self.config.base_interval() + self.jitter.jitter(self.config.jitter_window())
    }
}
