use core::time::Duration;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::{ClockSource, ConfigError, DEFAULT_EPOCH, DEFAULT_TICK};

/// Shared state updated by the ticker thread.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
}

/// A monotonic clock source that counts ticks since a user-defined epoch.
///
/// The wall clock is read exactly once, at construction, to find how far the
/// epoch lies in the past. From then on time is measured with [`Instant`], so
/// NTP steps or manual changes to the system clock never move the tick count
/// backward.
///
/// A background thread advances a shared atomic once per tick, which keeps
/// syscalls off the minting path. The thread exits on its own once every clone
/// of the clock has been dropped.
///
/// Clones share the same ticker.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    epoch: Duration,
    tick_size: Duration,
}

impl MonotonicClock {
    /// Constructs a clock whose tick zero is `epoch` (a [`Duration`] since
    /// 1970-01-01 UTC) and whose ticks last `tick_size`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroTickSize`] if `tick_size` is zero.
    /// - [`ConfigError::EpochInFuture`] if the system clock is earlier than
    ///   `epoch`.
    /// - [`ConfigError::ClockUnavailable`] if the ticker thread cannot be
    ///   spawned.
    ///
    /// # Example
    ///
    /// ```
    /// use auid::{ClockSource, MonotonicClock};
    /// use core::time::Duration;
    ///
    /// let now = std::time::SystemTime::now()
    ///     .duration_since(std::time::UNIX_EPOCH)
    ///     .unwrap();
    /// let clock = MonotonicClock::new(now, Duration::from_millis(1))?;
    ///
    /// std::thread::sleep(Duration::from_millis(5));
    ///
    /// // Usually close to 5, but the ticker may lag a tick behind.
    /// let ticks = clock.current_ticks();
    /// assert!(ticks < 5_000);
    /// # Ok::<(), auid::ConfigError>(())
    /// ```
    pub fn new(epoch: Duration, tick_size: Duration) -> Result<Self, ConfigError> {
        if tick_size.is_zero() {
            return Err(ConfigError::ZeroTickSize);
        }
        let start = Instant::now();
        let offset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|now| now.checked_sub(epoch))
            .ok_or(ConfigError::EpochInFuture { epoch })?;

        let offset_nanos = offset.as_nanos();
        let tick_nanos = tick_size.as_nanos();
        let ticks_at = move |elapsed: Duration| {
            let total = offset_nanos + elapsed.as_nanos();
            (u64::try_from(total / tick_nanos).unwrap_or(u64::MAX), total % tick_nanos)
        };

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(ticks_at(Duration::ZERO).0),
        });

        let weak_inner = Arc::downgrade(&inner);
        thread::Builder::new()
            .name("auid-ticker".into())
            .spawn(move || {
                loop {
                    let (ticks, into_tick) = ticks_at(start.elapsed());
                    {
                        let Some(inner_ref) = weak_inner.upgrade() else {
                            break;
                        };
                        // Elapsed time is monotonic, so this store never
                        // moves backward.
                        inner_ref.current.store(ticks, Ordering::Relaxed);
                    }
                    // Sleep until the next tick boundary
                    let remaining = tick_nanos - into_tick;
                    thread::sleep(Duration::from_nanos(
                        u64::try_from(remaining).unwrap_or(u64::MAX),
                    ));
                }
            })
            .map_err(|e| ConfigError::ClockUnavailable(e.to_string()))?;

        #[cfg(feature = "tracing")]
        debug!(?epoch, ?tick_size, ?offset, "monotonic clock started");

        Ok(Self {
            inner,
            epoch,
            tick_size,
        })
    }

    /// Constructs a millisecond clock anchored at [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// See [`MonotonicClock::new`].
    pub fn with_default_epoch() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_EPOCH, DEFAULT_TICK)
    }
}

impl ClockSource for MonotonicClock {
    fn epoch(&self) -> Duration {
        self.epoch
    }

    fn tick_size(&self) -> Duration {
        self.tick_size
    }

    fn current_ticks(&self) -> u64 {
        self.inner.current.load(Ordering::Relaxed)
    }
}
