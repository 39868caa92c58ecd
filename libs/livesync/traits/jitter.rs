use rand::Rng;
use std::time::Duration;

/// Trait for choosing the random part of the next poll delay
///
/// The synchronizer computes every delay as `base_interval + jitter(window)`.
/// Implementations must return a value in `[0, window]`.
pub trait JitterSource: Send + Sync {
    fn jitter(&self, window: Duration) -> Duration;
}

/// Uniformly distributed jitter in whole milliseconds
///
/// Spreads the polls of many open dashboards so they do not hit the API in
/// synchronized bursts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformJitter;

impl JitterSource for UniformJitter {
    fn jitter(&self, window: Duration) -> Duration {
        let window_ms = window.as_millis() as u64;
        if window_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=window_ms))
    }
}

/// No jitter at all, delays equal the base interval
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn jitter(&self, _window: Duration) -> Duration {
        Duration::ZERO
    }
}

/// Constant jitter, capped at the window
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    amount: Duration,
}

impl FixedJitter {
    pub fn new(amount: Duration) -> Self {
        Self { amount }
    }
}

impl JitterSource for FixedJitter {
    fn jitter(&self, window: Duration) -> Duration {
        self.amount.min(window)
    }
}
