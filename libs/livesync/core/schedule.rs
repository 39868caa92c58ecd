//! Schedule state of a synchronizer
//!
//! Pure bookkeeping, no I/O: which generation is current, whether a fetch of
//! that generation is outstanding, when the next regular fire is due and
//! whether the view is visible. The driver task consults it before every
//! action.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    deadline: Instant,
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct Schedule {
    generation: u64,
    /// Generation of the outstanding fetch, if any
    in_flight: Option<u64>,
    timer: Option<Timer>,
    visible: bool,
}

impl Schedule {
    pub(crate) fn new(generation: u64, visible: bool) -> Self {
        Self {
            generation,
            in_flight: None,
            timer: None,
            visible,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight == Some(self.generation)
    }

    /// Claim the in-flight slot for the current generation
    ///
    /// Returns the generation to tag the fetch with, or `None` when a fetch
    /// of this generation is still outstanding. Claiming cancels the timer.
    pub(crate) fn begin_fetch(&mut self) -> Option<u64> {
        if self.is_in_flight() {
            return None;
        }
        self.in_flight = Some(self.generation);
        self.timer = None;
        Some(self.generation)
    }

    /// Record a settlement, returns whether it may touch the snapshot
    pub(crate) fn settle(&mut self, generation: u64) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
        generation == self.generation
    }

    /// Arm the next regular fire `delay` after `now`
    ///
    /// Nothing is armed while hidden or while a fetch is outstanding.
    pub(crate) fn arm(&mut self, now: Instant, delay: Duration) -> Option<Instant> {
        if !self.visible || self.is_in_flight() {
            return None;
        }
        let deadline = now + delay;
        self.timer = Some(Timer {
            deadline,
            generation: self.generation,
        });
        Some(deadline)
    }

    /// Deadline of the pending timer of the current generation
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.timer
            .filter(|timer| timer.generation == self.generation)
            .map(|timer| timer.deadline)
    }

    /// Consume the pending timer, returns whether it should fire
    pub(crate) fn take_due(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => timer.generation == self.generation && self.visible,
            None => false,
        }
    }

    /// View hidden, returns whether a pending timer was cancelled
    pub(crate) fn hide(&mut self) -> bool {
        self.visible = false;
        self.timer.take().is_some()
    }

    /// View visible, returns whether this is a hidden-to-visible transition
    pub(crate) fn show(&mut self) -> bool {
        let was_hidden = !self.visible;
        self.visible = true;
        was_hidden
    }

    /// Move to a new generation, forgetting the outstanding fetch and timer
    pub(crate) fn advance(&mut self, generation: u64) {
        self.generation = generation;
        self.in_flight = None;
        self.timer = None;
    }
}
