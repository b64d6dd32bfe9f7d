//! Simulated SERV peer.
//!
//! An in-process model of the FPGA side of the link. It implements [`SpiBus`] so the
//! transport, loader and diagnostics can run without hardware:
//!
//! * **Writes:** bytes clocked in while select is asserted are buffered; on deassert a
//!   burst of exactly five bytes is decoded as a [`Frame`] and committed to memory. Any
//!   other burst length is counted as malformed and dropped.
//! * **Reads:** every byte clocked out is the status byte (0xA5 unless overridden).
//! * **Faults:** after a configurable number of bus operations every further operation
//!   fails with [`BusError::Disconnected`].

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::bus::SpiBus;
use crate::common::{BusError, STATUS_SENTINEL, Word};
use crate::protocol::Frame;

/// Number of word slots in peer memory.
pub const PEER_MEMORY_WORDS: usize = 256;

/// In-process model of the peer core's SPI slave.
#[derive(Debug, Clone)]
pub struct SimulatedPeer {
    memory: [Word; PEER_MEMORY_WORDS],
    selected: bool,
    rx: Vec<u8>,
    status: u8,
    scripted_status: VecDeque<u8>,
    committed: Vec<Frame>,
    malformed: usize,
    operations: usize,
    fail_after: Option<usize>,
}

impl Default for SimulatedPeer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPeer {
    /// Creates a healthy peer with zeroed memory.
    pub fn new() -> Self {
        Self {
            memory: [0; PEER_MEMORY_WORDS],
            selected: false,
            rx: Vec::with_capacity(8),
            status: STATUS_SENTINEL,
            scripted_status: VecDeque::new(),
            committed: Vec::new(),
            malformed: 0,
            operations: 0,
            fail_after: None,
        }
    }

    /// Sets the status byte returned once any scripted bytes are used up.
    #[must_use]
    pub fn with_status(mut self, status: u8) -> Self {
        self.status = status;
        self
    }

    /// Queues status bytes returned, in order, by the next reads.
    #[must_use]
    pub fn with_status_script(mut self, script: impl IntoIterator<Item = u8>) -> Self {
        self.scripted_status.extend(script);
        self
    }

    /// Makes every bus operation after the first `operations` fail.
    #[must_use]
    pub fn fail_after(mut self, operations: usize) -> Self {
        self.fail_after = Some(operations);
        self
    }

    /// Current contents of peer memory.
    pub const fn memory(&self) -> &[Word; PEER_MEMORY_WORDS] {
        &self.memory
    }

    /// Reads one slot of peer memory.
    pub fn word(&self, address: u8) -> Word {
        self.memory[usize::from(address)]
    }

    /// Frames committed so far, in arrival order.
    pub fn committed(&self) -> &[Frame] {
        &self.committed
    }

    /// Bursts dropped because they were not exactly one frame long.
    pub const fn malformed_bursts(&self) -> usize {
        self.malformed
    }

    /// Whether select is currently asserted.
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    fn tick(&mut self) -> Result<(), BusError> {
        if self.fail_after.is_some_and(|limit| self.operations >= limit) {
            return Err(BusError::Disconnected);
        }
        self.operations += 1;
        Ok(())
    }

    fn commit(&mut self) {
        if self.rx.is_empty() {
            return;
        }
        match Frame::try_from(self.rx.as_slice()) {
            Ok(frame) => {
                self.memory[usize::from(frame.address().val())] = frame.word();
                debug!(%frame, "peer committed frame");
                self.committed.push(frame);
            }
            Err(len) => {
                self.malformed += 1;
                warn!(len, "peer dropped malformed burst");
            }
        }
        self.rx.clear();
    }
}

impl SpiBus for SimulatedPeer {
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError> {
        self.tick()?;
        if asserted {
            self.rx.clear();
        } else if self.selected {
            self.commit();
        }
        self.selected = asserted;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.tick()?;
        if !self.selected {
            return Err(BusError::NotSelected);
        }
        self.rx.extend_from_slice(bytes);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        self.tick()?;
        if !self.selected {
            return Err(BusError::NotSelected);
        }
        for byte in buf.iter_mut() {
            *byte = self.scripted_status.pop_front().unwrap_or(self.status);
        }
        Ok(buf.len())
    }
}
