use core::time::Duration;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{ClockSource, DEFAULT_EPOCH, DEFAULT_TICK};

/// A clock that only moves when told to.
///
/// Meant for tests and simulations. Clones share the same tick counter, so a
/// test can keep one handle and hand another to the factory.
///
/// ```
/// use auid::{ClockSource, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let handle = clock.clone();
///
/// handle.advance(5);
/// assert_eq!(clock.current_ticks(), 105);
///
/// handle.set(99);
/// assert_eq!(clock.current_ticks(), 99);
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    ticks: Arc<AtomicU64>,
    epoch: Duration,
    tick_size: Duration,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ManualClock {
    /// A millisecond clock at [`DEFAULT_EPOCH`], starting at `ticks`.
    pub fn new(ticks: u64) -> Self {
        Self::with_epoch(DEFAULT_EPOCH, DEFAULT_TICK, ticks)
    }

    /// A clock with an explicit epoch and tick size, starting at `ticks`.
    pub fn with_epoch(epoch: Duration, tick_size: Duration, ticks: u64) -> Self {
        Self {
            ticks: Arc::new(AtomicU64::new(ticks)),
            epoch,
            tick_size,
        }
    }

    /// Jumps to `ticks`. Going backward is allowed, which is how tests
    /// simulate a misbehaving clock.
    pub fn set(&self, ticks: u64) {
        self.ticks.store(ticks, Ordering::Release);
    }

    /// Moves forward by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.ticks.fetch_add(ticks, Ordering::AcqRel);
    }
}

impl ClockSource for ManualClock {
    fn epoch(&self) -> Duration {
        self.epoch
    }

    fn tick_size(&self) -> Duration {
        self.tick_size
    }

    fn current_ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }
}
