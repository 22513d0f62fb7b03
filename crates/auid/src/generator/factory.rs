use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::{debug, error, instrument};

use crate::{
    Auid, AuidGenerator, AuidInfo, BitLayout, ClockSource, ConfigError, Error, ExtractError,
    GeneratorError, ID_BITS, IdGenStatus, MARKER_EX_LEN, MARKER_LEN, OriginIdProvider,
    capacity_bits, encode, generator::Mutex,
};

/// Mutable minting state, only ever touched under the factory lock.
#[derive(Debug)]
struct State {
    /// Tick of the last mint, `None` until the first one.
    last_ticks: Option<u64>,
    /// Counter within `last_ticks`.
    sequence: u64,
}

/// A claimed `(tick, sequence)` pair, or how long to back off.
enum Slot {
    Ready { ticks: u64, sequence: u64 },
    Pending { yield_for: u64 },
}

/// The identifier factory: mints [`Auid`]s from a clock, a fixed origin id
/// and a [`BitLayout`].
///
/// All minting on one factory is serialized through a single mutex holding
/// the last tick and the sequence counter. The critical section reads the
/// clock, compares and packs, nothing more.
///
/// For a single factory:
/// - timestamps never decrease across mints,
/// - ids minted within one tick differ by sequence,
/// - a tick earlier than the last minted one is a hard
///   [`GeneratorError::ClockRegression`], never silently corrected.
///
/// Uniqueness across factories rests on distinct origin ids, which is a
/// deployment concern.
///
/// Build one per process at startup and share it (`&`, `Arc`).
///
/// # Example
///
/// ```
/// use auid::{AuidFactory, BitLayout, ConstantOriginId, MonotonicClock};
///
/// let clock = MonotonicClock::with_default_epoch()?;
/// let factory = AuidFactory::new(BitLayout::default(), &ConstantOriginId::new(17), clock)?;
///
/// let id = factory.new_id()?;
/// let info = factory.extract_info(&id)?;
/// assert_eq!(info.origin_id(), 17);
/// # Ok::<(), auid::Error>(())
/// ```
#[derive(Debug)]
pub struct AuidFactory<C> {
    layout: BitLayout,
    origin_id: u64,
    clock: C,
    state: Mutex<State>,
}

impl<C: ClockSource> AuidFactory<C> {
    /// Builds a factory, resolving the origin id once through `origin`.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`ConfigError`], and returns
    /// [`ConfigError::OriginIdOutOfRange`] if a provider hands back a value
    /// that does not fit the layout.
    pub fn new<P>(layout: BitLayout, origin: &P, clock: C) -> Result<Self, ConfigError>
    where
        P: OriginIdProvider + ?Sized,
    {
        let max = layout.max_origin_id();
        let origin_id = origin.origin_id(max)?;
        if origin_id > max {
            return Err(ConfigError::OriginIdOutOfRange { origin_id, max });
        }

        #[cfg(feature = "tracing")]
        debug!(?layout, origin_id, "identifier factory ready");

        Ok(Self {
            layout,
            origin_id,
            clock,
            state: Mutex::new(State {
                last_ticks: None,
                sequence: 0,
            }),
        })
    }

    pub const fn layout(&self) -> BitLayout {
        self.layout
    }

    pub const fn origin_id(&self) -> u64 {
        self.origin_id
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mints the next identifier, yielding the thread while the current
    /// tick's sequence is exhausted.
    ///
    /// Throughput per factory is bounded by `max_sequence + 1` ids per tick.
    /// There is no timeout: the call returns once the clock moves on.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::ClockRegression`] if the clock moved backward.
    /// - [`GeneratorError::LockPoisoned`] if another thread panicked while
    ///   minting (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn new_id(&self) -> Result<Auid, GeneratorError> {
        let (ticks, sequence) = self.next_slot()?;
        Ok(self.pack(ticks, sequence))
    }

    /// Attempts to mint once without waiting.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence for the current
    /// tick is used up. Callers running on an executor can sleep or yield for
    /// `yield_for` ticks and retry.
    ///
    /// # Errors
    ///
    /// Same as [`AuidFactory::new_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus, GeneratorError> {
        Ok(match self.try_next_slot()? {
            Slot::Ready { ticks, sequence } => IdGenStatus::Ready {
                id: self.pack(ticks, sequence),
            },
            Slot::Pending { yield_for } => IdGenStatus::Pending { yield_for },
        })
    }

    /// A sortable 7 character "moment" marker: the current tick, reduced to
    /// the 41 bits 7 Base62 characters can hold.
    ///
    /// Claims a slot exactly like [`AuidFactory::new_id`], but markers are
    /// not unique: other callers in the same tick get the same text.
    ///
    /// # Errors
    ///
    /// Same as [`AuidFactory::new_id`].
    pub fn timestamp(&self) -> Result<String, GeneratorError> {
        let (ticks, _) = self.next_slot()?;
        let excess =
            u32::from(self.layout.timestamp_bits()).saturating_sub(capacity_bits(MARKER_LEN));
        Ok(encode(ticks >> excess, MARKER_LEN))
    }

    /// A finer 9 character marker: fields repacked as
    /// `[ticks | sequence | origin id]` and cut to the top 53 bits.
    ///
    /// Sorts by tick first, then by sequence. Not unique either.
    ///
    /// # Errors
    ///
    /// Same as [`AuidFactory::new_id`].
    pub fn timestamp_ex(&self) -> Result<String, GeneratorError> {
        let (ticks, sequence) = self.next_slot()?;
        let origin_bits = self.layout.origin_bits();
        let repacked = (ticks << (self.layout.sequence_bits() + origin_bits))
            | (sequence << origin_bits)
            | self.origin_id;
        let excess = u32::from(ID_BITS) - capacity_bits(MARKER_EX_LEN);
        Ok(encode(repacked >> excess, MARKER_EX_LEN))
    }

    /// Decomposes `id` under this factory's layout and clock.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::IdOutOfRange`] if the value cannot have been
    ///   produced under this layout.
    /// - [`ExtractError::TimestampOutOfRange`] if the clock cannot turn the
    ///   timestamp into wall-clock time.
    pub fn extract_info(&self, id: &Auid) -> Result<AuidInfo, ExtractError> {
        self.extract_raw(id.value())
    }

    /// Like [`AuidFactory::extract_info`], for a raw integer read from
    /// storage.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::IdOutOfRange`] for values above the layout
    /// maximum, instead of truncating them, and
    /// [`ExtractError::TimestampOutOfRange`] like `extract_info`.
    pub fn extract_raw(&self, raw: u64) -> Result<AuidInfo, ExtractError> {
        let max = self.layout.max_value();
        if raw > max {
            return Err(ExtractError::IdOutOfRange { id: raw, max });
        }
        let ticks = self.layout.timestamp_of(raw);
        let timestamp = self
            .clock
            .decode(ticks)
            .ok_or(ExtractError::TimestampOutOfRange { ticks })?;
        Ok(AuidInfo::new(
            Auid::from_raw(raw),
            self.layout,
            ticks,
            self.layout.origin_id_of(raw),
            self.layout.sequence_of(raw),
            timestamp,
        ))
    }

    /// [`Auid::parse`] followed by [`AuidFactory::extract_info`].
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed text, [`Error::Extract`] for values the
    /// layout cannot hold.
    pub fn parse_info(&self, s: &str) -> Result<AuidInfo, Error> {
        let id = Auid::parse(s)?;
        Ok(self.extract_info(&id)?)
    }

    fn pack(&self, ticks: u64, sequence: u64) -> Auid {
        Auid::from_raw(self.layout.pack(ticks, self.origin_id, sequence))
    }

    /// Claims a slot, yielding until one is free.
    fn next_slot(&self) -> Result<(u64, u64), GeneratorError> {
        loop {
            match self.try_next_slot()? {
                Slot::Ready { ticks, sequence } => return Ok((ticks, sequence)),
                Slot::Pending { .. } => std::thread::yield_now(),
            }
        }
    }

    fn try_next_slot(&self) -> Result<Slot, GeneratorError> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        // Read under the lock: a tick read before it could be older than one
        // another thread has already minted with.
        let ticks = self.clock.current_ticks() & self.layout.max_timestamp();
        let Some(last) = state.last_ticks else {
            state.last_ticks = Some(ticks);
            state.sequence = 0;
            return Ok(Slot::Ready { ticks, sequence: 0 });
        };

        match ticks.cmp(&last) {
            Ordering::Equal => {
                if state.sequence < self.layout.max_sequence() {
                    state.sequence += 1;
                    Ok(Slot::Ready {
                        ticks,
                        sequence: state.sequence,
                    })
                } else {
                    Ok(Slot::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                state.last_ticks = Some(ticks);
                state.sequence = 0;
                Ok(Slot::Ready { ticks, sequence: 0 })
            }
            Ordering::Less => Err(Self::cold_clock_behind(last, ticks)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: u64, now: u64) -> GeneratorError {
        #[cfg(feature = "tracing")]
        error!(last, now, "clock regression, refusing to mint");

        GeneratorError::ClockRegression { last, now }
    }
}

impl<C: ClockSource> AuidGenerator for AuidFactory<C> {
    fn new_id(&self) -> Result<Auid, GeneratorError> {
        Self::new_id(self)
    }

    fn try_poll_id(&self) -> Result<IdGenStatus, GeneratorError> {
        Self::try_poll_id(self)
    }
}
