//! # Transport Tests
//!
//! Verifies the select/settle/transfer/settle/deselect/completion sequence for both
//! transaction kinds, error propagation without retries, and transaction accounting.

use mockall::Sequence;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use servdiag_core::bus::{NoDelay, Transport};
use servdiag_core::common::{BusError, MemAddr};
use servdiag_core::config::TimingConfig;
use servdiag_core::protocol::encode;

use crate::common::harness::TestContext;
use crate::common::mocks::bus::{Event, MockSpi, RecordingBus, RecordingDelay, Timeline};

#[test]
fn test_write_frame_timing_sequence() {
    let mut ctx = TestContext::new();
    let frame = encode(MemAddr::new(10), 0xABCD_EF00);

    ctx.transport.write_frame(&frame).unwrap();

    assert_eq!(
        ctx.timeline.events(),
        vec![
            Event::Select(true),
            Event::DelayUs(2),
            Event::Write(vec![10, 0x00, 0xEF, 0xCD, 0xAB]),
            Event::DelayUs(2),
            Event::Select(false),
            Event::DelayUs(1_000),
        ]
    );
}

#[test]
fn test_read_status_timing_sequence() {
    let mut ctx = TestContext::with_bus(|bus| bus.with_reads([0xA5]));

    let status = ctx.transport.read_status_byte().unwrap();

    assert_eq!(status, 0xA5);
    assert_eq!(
        ctx.timeline.events(),
        vec![
            Event::Select(true),
            Event::DelayUs(2),
            Event::Read(1),
            Event::DelayUs(2),
            Event::Select(false),
            Event::DelayUs(10),
        ]
    );
}

#[test]
fn test_read_status_empty_read_yields_zero() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.transport.read_status_byte().unwrap(), 0);
    assert_eq!(ctx.transport.stats().status_reads, 1);
}

#[test]
fn test_write_word_encodes_frame() {
    let mut ctx = TestContext::new();
    ctx.transport
        .write_word(MemAddr::new(255), 0xFFFF_FFFF)
        .unwrap();
    assert_eq!(
        ctx.timeline.frames(),
        vec![encode(MemAddr::new(255), 0xFFFF_FFFF)]
    );
}

#[test]
fn test_custom_timing_is_applied() {
    let timeline = Timeline::default();
    let timing = TimingConfig {
        pre_settle_us: 5,
        post_settle_us: 7,
        write_completion_us: 2_000,
        read_completion_us: 50,
        inter_check_pause_ms: 300,
    };
    let mut transport = Transport::with_timing(
        RecordingBus::new(timeline.clone()),
        RecordingDelay::new(timeline.clone()),
        timing,
    );

    transport.write_word(MemAddr::MIN, 1).unwrap();
    let _ = transport.read_status_byte().unwrap();

    let delays: Vec<_> = timeline
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::DelayUs(_)))
        .collect();
    assert_eq!(
        delays,
        vec![
            Event::DelayUs(5),
            Event::DelayUs(7),
            Event::DelayUs(2_000),
            Event::DelayUs(5),
            Event::DelayUs(7),
            Event::DelayUs(50),
        ]
    );
}

#[test]
fn test_failed_write_releases_select_and_skips_completion() {
    let mut ctx = TestContext::with_bus(|bus| bus.fail_write_at(0));

    let err = ctx
        .transport
        .write_word(MemAddr::new(3), 0x13)
        .unwrap_err();

    assert!(matches!(err, BusError::Disconnected));
    assert_eq!(
        ctx.timeline.events(),
        vec![Event::Select(true), Event::DelayUs(2), Event::Select(false)]
    );
    let stats = ctx.transport.stats();
    assert_eq!(stats.frames_written, 0);
    assert_eq!(stats.failures, 1);
}

#[test]
fn test_write_error_is_not_retried() {
    let mut bus = MockSpi::new();
    let mut seq = Sequence::new();
    bus.expect_set_select()
        .with(eq(true))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    bus.expect_write()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Err(BusError::ShortWrite {
                expected: 5,
                written: 2,
            })
        });
    bus.expect_set_select()
        .with(eq(false))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut transport = Transport::new(bus, NoDelay);
    let err = transport.write_word(MemAddr::new(1), 2).unwrap_err();

    assert_eq!(err.to_string(), "short write: 2 of 5 bytes transmitted");
}

#[test]
fn test_select_failure_aborts_before_transfer() {
    let mut bus = MockSpi::new();
    bus.expect_set_select()
        .times(1)
        .returning(|_| Err(BusError::SelectLine("GPIO1 busy".into())));
    bus.expect_write().never();
    bus.expect_read().never();

    let mut transport = Transport::new(bus, NoDelay);
    let err = transport.read_status_byte().unwrap_err();

    assert!(matches!(err, BusError::SelectLine(_)));
    assert_eq!(transport.stats().failures, 1);
}

#[test]
fn test_read_fills_status_from_driver() {
    let mut bus = MockSpi::new();
    bus.expect_set_select().returning(|_| Ok(()));
    bus.expect_read().times(1).returning(|buf| {
        assert_eq!(buf.len(), 1);
        buf[0] = 0x5A;
        Ok(1)
    });

    let mut transport = Transport::new(bus, NoDelay);
    assert_eq!(transport.read_status_byte().unwrap(), 0x5A);
}

#[test]
fn test_stats_count_transactions() {
    let mut ctx = TestContext::with_bus(|bus| bus.with_reads([0xA5, 0xA5]));
    for addr in 0..3u8 {
        ctx.transport.write_word(MemAddr::new(addr), 0).unwrap();
    }
    let _ = ctx.transport.read_status_byte().unwrap();
    let _ = ctx.transport.read_status_byte().unwrap();

    let stats = ctx.transport.stats();
    assert_eq!(stats.frames_written, 3);
    assert_eq!(stats.status_reads, 2);
    assert_eq!(stats.failures, 0);
}

#[test]
fn test_dwell_blocks_without_bus_traffic() {
    let mut ctx = TestContext::new();
    ctx.transport.dwell(300);
    assert_eq!(ctx.timeline.events(), vec![Event::DelayMs(300)]);
}
