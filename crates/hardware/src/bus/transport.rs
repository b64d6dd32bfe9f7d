//! Bus transport: framed writes and status reads with timing discipline.
//!
//! The transport owns the physical bus handle for the lifetime of a session. It performs:
//! 1. **Frame writes:** select, settle, 5-byte burst, settle, deselect, completion wait.
//! 2. **Status reads:** select, settle, 1-byte burst, settle, deselect, short wait.
//! 3. **Accounting:** counts of frames, reads and failed transactions.
//!
//! Every operation takes `&mut self`, so two loaders or two suite runs can never interleave
//! bursts on the same select line.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::traits::{Delay, SpiBus};
use crate::common::{BusError, MemAddr, Word};
use crate::config::TimingConfig;
use crate::protocol::Frame;

/// Transaction counters for one transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BusStats {
    /// Write frames fully transmitted.
    pub frames_written: u64,
    /// Status bytes read.
    pub status_reads: u64,
    /// Transactions that ended in a [`BusError`].
    pub failures: u64,
}

/// Exclusive session over one SPI link to the peer core.
#[derive(Debug)]
pub struct Transport<B, D> {
    bus: B,
    delay: D,
    timing: TimingConfig,
    stats: BusStats,
}

impl<B: SpiBus, D: Delay> Transport<B, D> {
    /// Creates a transport with the default timing contract.
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_timing(bus, delay, TimingConfig::default())
    }

    /// Creates a transport with explicit timing.
    ///
    /// `timing` is expected to have passed [`TimingConfig::validate`].
    pub const fn with_timing(bus: B, delay: D, timing: TimingConfig) -> Self {
        Self {
            bus,
            delay,
            timing,
            stats: BusStats {
                frames_written: 0,
                status_reads: 0,
                failures: 0,
            },
        }
    }

    /// Transmits one write frame and waits for the peer to commit it.
    ///
    /// Returns only after the completion delay has elapsed, so the next transaction can be
    /// issued immediately.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BusError`] from the bus; nothing is retried.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), BusError> {
        trace!(%frame, "write frame");
        if let Err(e) = self.burst(|bus| bus.write(frame.as_bytes())) {
            self.stats.failures += 1;
            warn!(%frame, error = %e, "write frame failed");
            return Err(e);
        }
        self.delay.delay_us(self.timing.write_completion_us);
        self.stats.frames_written += 1;
        Ok(())
    }

    /// Encodes and writes one word.
    ///
    /// # Errors
    ///
    /// As [`Transport::write_frame`].
    pub fn write_word(&mut self, address: MemAddr, data: Word) -> Result<(), BusError> {
        self.write_frame(&Frame::encode(address, data))
    }

    /// Reads the peer's status byte.
    ///
    /// Returns 0 if the bus clocked in nothing.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BusError`] from the bus; nothing is retried.
    pub fn read_status_byte(&mut self) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        let received = match self.burst(|bus| bus.read(&mut buf)) {
            Ok(n) => n,
            Err(e) => {
                self.stats.failures += 1;
                warn!(error = %e, "status read failed");
                return Err(e);
            }
        };
        self.delay.delay_us(self.timing.read_completion_us);
        self.stats.status_reads += 1;

        let status = if received == 0 { 0 } else { buf[0] };
        debug!(received, "status read {status:#04X}");
        Ok(status)
    }

    /// Blocks for `ms` milliseconds without touching the bus.
    ///
    /// Used to give the peer core time to react between transactions.
    pub fn dwell(&mut self, ms: u64) {
        self.delay.delay_ms(ms);
    }

    /// Runs `transfer` inside one select-asserted window with settle delays on both edges.
    ///
    /// If the transfer fails, select is released on a best-effort basis before the original
    /// error is returned.
    fn burst<T>(
        &mut self,
        transfer: impl FnOnce(&mut B) -> Result<T, BusError>,
    ) -> Result<T, BusError> {
        self.bus.set_select(true)?;
        self.delay.delay_us(self.timing.pre_settle_us);

        let value = match transfer(&mut self.bus) {
            Ok(value) => value,
            Err(e) => {
                if let Err(release) = self.bus.set_select(false) {
                    warn!(error = %release, "select release after failed transfer");
                }
                return Err(e);
            }
        };

        self.delay.delay_us(self.timing.post_settle_us);
        self.bus.set_select(false)?;
        Ok(value)
    }

    /// Timing in effect for this transport.
    pub const fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Transaction counters.
    pub const fn stats(&self) -> BusStats {
        self.stats
    }

    /// Shared access to the bus handle.
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Exclusive access to the bus handle.
    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Ends the session and returns the bus and delay handles.
    pub fn into_parts(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
