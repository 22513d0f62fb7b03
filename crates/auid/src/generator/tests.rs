use crate::{
    Auid, AuidFactory, AuidGenerator, BitLayout, ClockSource, ConfigError, ConstantOriginId,
    Error, ExtractError, GeneratorError, IdGenStatus, ManualClock, MonotonicClock,
    OriginIdProvider, ParseError,
};
use core::time::Duration;
use std::collections::HashSet;
use std::sync::Mutex;
use std::thread::{scope, sleep};
use std::time::UNIX_EPOCH;

trait IdGenStatusExt {
    fn unwrap_ready(self) -> Auid;
    fn unwrap_pending(self) -> u64;
}

impl IdGenStatusExt for IdGenStatus {
    fn unwrap_ready(self) -> Auid {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> u64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

/// Provider that ignores the layout maximum.
struct Unchecked(u64);

impl OriginIdProvider for Unchecked {
    fn origin_id(&self, _max_origin_id: u64) -> Result<u64, ConfigError> {
        Ok(self.0)
    }
}

fn manual_factory(
    layout: BitLayout,
    origin_id: u64,
    ticks: u64,
) -> (AuidFactory<ManualClock>, ManualClock) {
    let clock = ManualClock::new(ticks);
    let origin = ConstantOriginId::new(origin_id);
    let factory = AuidFactory::new(layout, &origin, clock.clone()).unwrap();
    (factory, clock)
}

fn monotonic_factory(origin_id: u64) -> AuidFactory<MonotonicClock> {
    let clock = MonotonicClock::with_default_epoch().unwrap();
    AuidFactory::new(BitLayout::default(), &ConstantOriginId::new(origin_id), clock).unwrap()
}

#[test]
fn first_three_ids_at_tick_zero() {
    let (factory, _) = manual_factory(BitLayout::default(), 0, 0);
    let ids: Vec<Auid> = (0..3).map(|_| factory.new_id().unwrap()).collect();
    assert_eq!(ids[0].as_str(), "00000000000");
    assert_eq!(ids[1].as_str(), "00000000001");
    assert_eq!(ids[2].as_str(), "00000000002");
    // the very first id coincides with the sentinel
    assert!(ids[0].is_empty());
}

#[test]
fn layout_summing_to_64_is_fatal() {
    let err = BitLayout::new(41, 12, 11).unwrap_err();
    assert!(matches!(err, ConfigError::BitWidthSum { .. }));
    assert!(Error::from(err).is_fatal());
}

#[test]
fn rewinding_the_clock_is_a_regression() {
    let (factory, clock) = manual_factory(BitLayout::default(), 3, 100);
    factory.new_id().unwrap();

    clock.set(99);
    assert_eq!(
        factory.new_id(),
        Err(GeneratorError::ClockRegression { last: 100, now: 99 })
    );
    assert_eq!(
        factory.try_poll_id(),
        Err(GeneratorError::ClockRegression { last: 100, now: 99 })
    );
    assert!(factory.timestamp().is_err());

    // not auto-corrected, but minting resumes once the clock catches up
    clock.set(100);
    let id = factory.new_id().unwrap();
    let info = factory.extract_info(&id).unwrap();
    assert_eq!(info.ticks(), 100);
    assert_eq!(info.sequence(), 1);
}

#[test]
fn malformed_text_is_rejected() {
    assert_eq!(
        Auid::parse("00000"),
        Err(ParseError::InvalidLength {
            len: 5,
            expected: 11
        })
    );
    assert!(matches!(
        Auid::parse("123456789-0"),
        Err(ParseError::Base62(_))
    ));
}

#[test]
fn sequence_increments_within_tick_and_resets_on_advance() {
    let (factory, clock) = manual_factory(BitLayout::default(), 1, 42);

    let ids: Vec<Auid> = (0..3)
        .map(|_| factory.try_poll_id().unwrap().unwrap_ready())
        .collect();
    for (expected, id) in ids.iter().enumerate() {
        let info = factory.extract_info(id).unwrap();
        assert_eq!(info.ticks(), 42);
        assert_eq!(info.origin_id(), 1);
        assert_eq!(info.sequence(), expected as u64);
    }
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);

    clock.advance(1);
    let next = factory.new_id().unwrap();
    let info = factory.extract_info(&next).unwrap();
    assert_eq!(info.ticks(), 43);
    assert_eq!(info.sequence(), 0);
    assert!(next > ids[2]);
}

#[test]
fn pending_when_sequence_exhausted() {
    let layout = BitLayout::new(51, 10, 2).unwrap();
    let (factory, clock) = manual_factory(layout, 0, 7);

    for sequence in 0..=layout.max_sequence() {
        let id = factory.try_poll_id().unwrap().unwrap_ready();
        assert_eq!(layout.sequence_of(id.value()), sequence);
    }
    assert_eq!(factory.try_poll_id().unwrap().unwrap_pending(), 1);
    assert_eq!(factory.try_poll_id().unwrap().ready(), None);

    clock.advance(1);
    let id = factory.try_poll_id().unwrap().unwrap_ready();
    assert_eq!(layout.timestamp_of(id.value()), 8);
    assert_eq!(layout.sequence_of(id.value()), 0);
}

#[test]
fn new_id_waits_for_the_next_tick() {
    let layout = BitLayout::new(51, 10, 2).unwrap();
    let (factory, clock) = manual_factory(layout, 0, 5);
    for _ in 0..=layout.max_sequence() {
        factory.new_id().unwrap();
    }

    let id = scope(|s| {
        s.spawn(|| {
            sleep(Duration::from_millis(20));
            clock.advance(1);
        });
        factory.new_id().unwrap()
    });

    assert_eq!(layout.timestamp_of(id.value()), 6);
    assert_eq!(layout.sequence_of(id.value()), 0);
}

#[test]
fn ticks_are_masked_to_the_layout() {
    let layout = BitLayout::new(3, 50, 10).unwrap();
    let (factory, _) = manual_factory(layout, 0, 9);
    let id = factory.new_id().unwrap();
    assert_eq!(layout.timestamp_of(id.value()), 1);
}

#[test]
fn origin_id_must_fit_the_layout() {
    let clock = ManualClock::default();
    assert_eq!(
        AuidFactory::new(BitLayout::default(), &ConstantOriginId::new(4096), clock.clone())
            .unwrap_err(),
        ConfigError::OriginIdOutOfRange {
            origin_id: 4096,
            max: 4095
        }
    );
    assert_eq!(
        AuidFactory::new(BitLayout::default(), &Unchecked(5000), clock).unwrap_err(),
        ConfigError::OriginIdOutOfRange {
            origin_id: 5000,
            max: 4095
        }
    );
}

#[test]
fn extraction_returns_the_factory_origin_every_time() {
    let factory = monotonic_factory(42);
    for _ in 0..10_000 {
        let id = factory.new_id().unwrap();
        let info = factory.extract_info(&id).unwrap();
        assert_eq!(info.origin_id(), 42);
        assert_eq!(info.id(), id);
    }
}

#[test]
fn extraction_decodes_time_through_the_clock() {
    let clock =
        ManualClock::with_epoch(Duration::from_secs(1_000), Duration::from_millis(1), 1_500);
    let origin = ConstantOriginId::new(9);
    let factory = AuidFactory::new(BitLayout::default(), &origin, clock).unwrap();
    let info = factory.extract_info(&factory.new_id().unwrap()).unwrap();
    assert_eq!(info.timestamp(), UNIX_EPOCH + Duration::from_millis(1_001_500));
    assert_eq!(info.layout(), BitLayout::default());
}

#[test]
fn extraction_rejects_values_beyond_the_layout() {
    let (factory, _) = manual_factory(BitLayout::default(), 0, 0);
    assert_eq!(
        factory.extract_raw(u64::MAX).unwrap_err(),
        ExtractError::IdOutOfRange {
            id: u64::MAX,
            max: i64::MAX as u64
        }
    );
    assert!(factory.extract_raw(i64::MAX as u64).is_ok());
}

#[test]
fn extraction_reports_unrepresentable_time_instead_of_panicking() {
    // 60 day ticks overflow SystemTime long before the 41 bit field does
    let clock = ManualClock::with_epoch(
        Duration::from_secs(1_000),
        Duration::from_secs(60 * 60 * 24 * 60),
        0,
    );
    let factory =
        AuidFactory::new(BitLayout::default(), &ConstantOriginId::new(0), clock).unwrap();

    let id = Auid::parse("AzL8n0Y58m7").unwrap();
    let ticks = BitLayout::default().timestamp_of(id.value());
    assert_eq!(
        factory.extract_info(&id),
        Err(ExtractError::TimestampOutOfRange { ticks })
    );
    assert!(matches!(
        factory.parse_info("AzL8n0Y58m7"),
        Err(Error::Extract(ExtractError::TimestampOutOfRange { .. }))
    ));

    // small tick counts still decode
    let info = factory.extract_raw(1 << 22).unwrap();
    assert_eq!(
        info.timestamp(),
        UNIX_EPOCH + Duration::from_secs(1_000 + 60 * 60 * 24 * 60)
    );
}

#[test]
fn parse_info_combines_parse_and_extract() {
    let (factory, _) = manual_factory(BitLayout::default(), 0, 0);
    let info = factory.parse_info("000004Zr3GJ").unwrap();
    assert_eq!(info.ticks(), 1_000);
    assert_eq!(info.origin_id(), 42);
    assert_eq!(info.sequence(), 7);

    let err = factory.parse_info("00000").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::InvalidLength { .. })));
    assert!(!err.is_fatal());
}

#[test]
fn moment_markers() {
    let (factory, clock) = manual_factory(BitLayout::default(), 42, 1_000);

    assert_eq!(factory.timestamp().unwrap(), "00000G8");
    // second slot of tick 1000: [1000 | 1 | 42] >> 10
    assert_eq!(factory.timestamp_ex().unwrap(), "00000HBYa");
    // markers are not unique
    assert_eq!(factory.timestamp().unwrap(), "00000G8");

    clock.advance(1);
    let ex = factory.timestamp_ex().unwrap();
    assert_eq!(ex, "00000HCca");
    assert!(ex.as_str() > "00000HBYa");
    assert_eq!(factory.timestamp().unwrap(), "00000G9");
}

#[test]
fn markers_share_the_regression_check() {
    let (factory, clock) = manual_factory(BitLayout::default(), 0, 10);
    factory.timestamp_ex().unwrap();
    clock.set(9);
    assert_eq!(
        factory.timestamp_ex(),
        Err(GeneratorError::ClockRegression { last: 10, now: 9 })
    );
}

#[test]
fn text_order_matches_value_order_and_round_trips() {
    let factory = monotonic_factory(7);
    let ids: Vec<Auid> = (0..50_000).map(|_| factory.new_id().unwrap()).collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[0].as_str() < pair[1].as_str());
    }
    for id in &ids {
        assert_eq!(Auid::parse(id.as_str()).unwrap(), *id);
        assert_eq!(Auid::try_from(id.to_i64()).unwrap(), *id);
    }
}

#[test]
fn monotonic_within_each_thread_and_unique_across_threads() {
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 25_000;
    const TOTAL_IDS: usize = THREADS * IDS_PER_THREAD;

    let factory = monotonic_factory(1);
    let seen_ids = Mutex::new(HashSet::with_capacity(TOTAL_IDS));

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let mut local = Vec::with_capacity(IDS_PER_THREAD);
                for _ in 0..IDS_PER_THREAD {
                    local.push(factory.new_id().unwrap());
                }
                assert!(local.windows(2).all(|pair| pair[0] < pair[1]));
                let mut seen = seen_ids.lock().unwrap();
                for id in local {
                    assert!(seen.insert(id));
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, TOTAL_IDS, "Expected {TOTAL_IDS} unique IDs");
}

#[test]
fn trait_object_mints_through_the_factory() {
    let (factory, clock) = manual_factory(BitLayout::default(), 0, 0);
    let generator: &dyn AuidGenerator = &factory;

    generator.new_id().unwrap();
    let id = generator.try_poll_id().unwrap().unwrap_ready();
    assert_eq!(id.value(), 1);
    assert_eq!(factory.clock().current_ticks(), clock.current_ticks());
}
