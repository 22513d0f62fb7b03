use core::time::Duration;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

/// Default epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// Default tick: one millisecond.
pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A source of ticks elapsed since a fixed epoch.
///
/// The factory only ever asks for [`ClockSource::current_ticks`]; the epoch and
/// tick size are needed to turn a stored tick count back into wall-clock time.
///
/// Ticks are expected to be non-decreasing. An implementation does not have to
/// prevent small backward jumps: the factory detects them and refuses to mint.
///
/// # Example
///
/// ```
/// use auid::{ClockSource, DEFAULT_EPOCH, DEFAULT_TICK};
/// use core::time::Duration;
///
/// struct FixedTime;
/// impl ClockSource for FixedTime {
///     fn epoch(&self) -> Duration {
///         DEFAULT_EPOCH
///     }
///     fn tick_size(&self) -> Duration {
///         DEFAULT_TICK
///     }
///     fn current_ticks(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_ticks(), 1234);
/// ```
pub trait ClockSource {
    /// The zero point, as a duration since 1970-01-01 UTC.
    fn epoch(&self) -> Duration;

    /// Real time represented by one tick.
    fn tick_size(&self) -> Duration;

    /// Ticks elapsed since [`ClockSource::epoch`].
    fn current_ticks(&self) -> u64;

    /// Converts a tick count to wall-clock time: `epoch + ticks * tick_size`.
    ///
    /// Returns `None` if the result is not representable as a [`SystemTime`].
    fn decode(&self, ticks: u64) -> Option<SystemTime> {
        let nanos = self.tick_size().as_nanos().checked_mul(u128::from(ticks))?;
        let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
        // always < 1e9
        let subsec = (nanos % NANOS_PER_SEC) as u32;
        UNIX_EPOCH
            .checked_add(self.epoch())?
            .checked_add(Duration::new(secs, subsec))
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn epoch(&self) -> Duration {
        (**self).epoch()
    }

    fn tick_size(&self) -> Duration {
        (**self).tick_size()
    }

    fn current_ticks(&self) -> u64 {
        (**self).current_ticks()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for Arc<C> {
    fn epoch(&self) -> Duration {
        (**self).epoch()
    }

    fn tick_size(&self) -> Duration {
        (**self).tick_size()
    }

    fn current_ticks(&self) -> u64 {
        (**self).current_ticks()
    }
}
