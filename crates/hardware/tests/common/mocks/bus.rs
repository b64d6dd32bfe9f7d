use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mockall::mock;
use servdiag_core::bus::{Delay, SpiBus};
use servdiag_core::common::BusError;
use servdiag_core::protocol::Frame;
use servdiag_core::soc::SimulatedPeer;

mock! {
    pub Spi {}
    impl SpiBus for Spi {
        fn set_select(&mut self, asserted: bool) -> Result<(), BusError>;
        fn write(&mut self, bytes: &[u8]) -> Result<(), BusError>;
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;
    }
}

/// One observable step of a bus session, bus operations and delays interleaved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Select(bool),
    Write(Vec<u8>),
    Read(usize),
    DelayUs(u64),
    DelayMs(u64),
}

/// Shared, ordered log of [`Event`]s.
#[derive(Clone, Debug, Default)]
pub struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Every complete write burst, decoded as a frame.
    pub fn frames(&self) -> Vec<Frame> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Frame::try_from(bytes.as_slice()).ok(),
                _ => None,
            })
            .collect()
    }

    /// Millisecond dwells, in order.
    pub fn dwells(&self) -> Vec<u64> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }
}

/// Bus that records every operation and replays scripted status bytes.
///
/// Reads past the end of the script receive nothing (`Ok(0)`).
#[derive(Debug)]
pub struct RecordingBus {
    timeline: Timeline,
    reads: VecDeque<u8>,
    writes: usize,
    fail_write_at: Option<usize>,
}

impl RecordingBus {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            reads: VecDeque::new(),
            writes: 0,
            fail_write_at: None,
        }
    }

    pub fn with_reads(mut self, reads: impl IntoIterator<Item = u8>) -> Self {
        self.reads.extend(reads);
        self
    }

    /// Fails the `n`-th write burst (0-based) and every one after it.
    pub fn fail_write_at(mut self, n: usize) -> Self {
        self.fail_write_at = Some(n);
        self
    }
}

impl SpiBus for RecordingBus {
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError> {
        self.timeline.push(Event::Select(asserted));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        let n = self.writes;
        self.writes += 1;
        if self.fail_write_at.is_some_and(|at| n >= at) {
            return Err(BusError::Disconnected);
        }
        self.timeline.push(Event::Write(bytes.to_vec()));
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        let mut got = 0;
        for slot in buf.iter_mut() {
            match self.reads.pop_front() {
                Some(b) => {
                    *slot = b;
                    got += 1;
                }
                None => break,
            }
        }
        self.timeline.push(Event::Read(got));
        Ok(got)
    }
}

/// Delay that records instead of sleeping.
#[derive(Debug, Clone)]
pub struct RecordingDelay {
    timeline: Timeline,
}

impl RecordingDelay {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

impl Delay for RecordingDelay {
    fn delay_us(&mut self, us: u64) {
        self.timeline.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u64) {
        self.timeline.push(Event::DelayMs(ms));
    }
}

/// Simulated peer that panics on the first status read.
#[derive(Debug, Default)]
pub struct PanickingPeer {
    pub inner: SimulatedPeer,
}

impl SpiBus for PanickingPeer {
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError> {
        self.inner.set_select(asserted)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.inner.write(bytes)
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, BusError> {
        panic!("MISO line stuck");
    }
}
