//! Common test utilities for LiveSync integration tests
//!
//! Provides a scripted fetcher that records every call, tracks how many
//! calls overlap, and can be held open by a semaphore gate.

#![allow(dead_code)]

use async_trait::async_trait;
use livesync::{FetchError, Fetcher, SyncConfig};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Timer wheel granularity under the paused test clock
pub const TIMER_SLACK: Duration = Duration::from_millis(2);

/// One recorded fetch call
#[derive(Debug, Clone)]
pub struct Call {
    /// 1-based call number
    pub index: usize,
    pub identity: String,
    pub at: Instant,
}

/// Shared record of fetch calls
#[derive(Debug, Default)]
pub struct FetchLog {
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FetchLog {
    fn record(&self, identity: &str) -> usize {
        let mut calls = self.calls.lock();
        let index = calls.len() + 1;
        calls.push(Call {
            index,
            identity: identity.to_string(),
            at: Instant::now(),
        });
        index
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Gaps between consecutive calls
    pub fn gaps(&self) -> Vec<Duration> {
        self.calls()
            .windows(2)
            .map(|pair| pair[1].at - pair[0].at)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::Acquire)
    }
}

/// Fetcher with scripted outcomes
///
/// Without a scripted outcome a call returns its own call number.
#[derive(Clone)]
pub struct ScriptedFetcher {
    log: Arc<FetchLog>,
    outcomes: Arc<Mutex<VecDeque<Result<u32, String>>>>,
    latency: Duration,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            log: Arc::new(FetchLog::default()),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            latency: Duration::ZERO,
            gate: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Hold every call until a permit is added to the returned gate
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn push_outcome(&self, outcome: Result<u32, &str>) {
        self.outcomes
            .lock()
            .push_back(outcome.map_err(|e| e.to_string()));
    }

    pub fn log(&self) -> Arc<FetchLog> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl Fetcher<String, u32> for ScriptedFetcher {
    async fn fetch(&self, identity: &String) -> Result<u32, FetchError> {
        let index = self.log.record(identity);
        let outcome = self.outcomes.lock().pop_front();

        let now_in_flight = self.log.in_flight.fetch_add(1, Ordering::AcqRel) + 1;
        self.log.max_in_flight.fetch_max(now_in_flight, Ordering::AcqRel);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.log.in_flight.fetch_sub(1, Ordering::AcqRel);

        match outcome {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(FetchError::new(message)),
            None => Ok(index as u32),
        }
    }
}

/// Timing policy in whole milliseconds
pub fn config(base_ms: u64, jitter_ms: u64) -> SyncConfig {
    SyncConfig::new(Duration::from_millis(base_ms))
        .with_jitter_window(Duration::from_millis(jitter_ms))
}

/// Let spawned tasks run without advancing the clock
pub async fn drain() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock and let everything due run
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
    drain().await;
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
