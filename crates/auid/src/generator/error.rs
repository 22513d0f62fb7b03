/// Errors raised while minting.
///
/// These are fatal for the call: the caller should treat id minting as
/// unavailable rather than retry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum GeneratorError {
    /// The clock reported a tick earlier than one already used for minting.
    ///
    /// The factory never resynchronizes on its own, since that could hand out
    /// duplicate or out-of-order identifiers.
    #[error("clock moved backward: tick {now} is before last minted tick {last}")]
    ClockRegression { last: u64, now: u64 },

    /// A thread panicked while holding the factory lock. Not available with
    /// the `parking-lot` feature, whose mutex does not poison.
    #[cfg(not(feature = "parking-lot"))]
    #[error("factory lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};

#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for GeneratorError {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
