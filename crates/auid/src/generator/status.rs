use crate::Auid;

/// Outcome of a single non-blocking mint attempt,
/// [`AuidFactory::try_poll_id`](crate::AuidFactory::try_poll_id).
///
/// - [`IdGenStatus::Ready`] carries a freshly minted identifier.
/// - [`IdGenStatus::Pending`] means every sequence value of the current tick
///   is used up; retry once the clock has advanced.
///
/// # Example
///
/// ```
/// use auid::{AuidFactory, BitLayout, ConstantOriginId, IdGenStatus, ManualClock};
///
/// // no sequence bits: one id per tick
/// let layout = BitLayout::new(51, 12, 0)?;
/// let clock = ManualClock::new(7);
/// let factory = AuidFactory::new(layout, &ConstantOriginId::new(1), clock.clone())?;
///
/// assert!(matches!(factory.try_poll_id()?, IdGenStatus::Ready { .. }));
/// assert_eq!(factory.try_poll_id()?, IdGenStatus::Pending { yield_for: 1 });
///
/// clock.advance(1);
/// match factory.try_poll_id()? {
///     IdGenStatus::Ready { id } => println!("minted {id}"),
///     IdGenStatus::Pending { yield_for } => println!("back off for {yield_for} ticks"),
/// }
/// # Ok::<(), auid::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique identifier was minted.
    Ready { id: Auid },
    /// The sequence for the current tick is exhausted.
    Pending {
        /// Ticks to wait before trying again.
        yield_for: u64,
    },
}

impl IdGenStatus {
    /// Returns the identifier, if one was minted.
    pub const fn ready(self) -> Option<Auid> {
        match self {
            Self::Ready { id } => Some(id),
            Self::Pending { .. } => None,
        }
    }
}
