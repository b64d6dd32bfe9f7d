//! Capability traits for the physical SPI link.
//!
//! The transport never touches hardware directly. It drives two capabilities:
//! 1. **`SpiBus`:** select-line control plus raw byte transmit and receive.
//! 2. **`Delay`:** blocking waits used to honour the bus timing contract.
//!
//! A host driver (spidev, a USB bridge, a microcontroller HAL) implements `SpiBus`; the
//! in-process [`SimulatedPeer`](crate::soc::SimulatedPeer) implements it for tests and
//! dry runs.

use crate::common::BusError;

/// Physical-layer access to the peer core.
///
/// Implementations perform no framing and no timing; [`Transport`](super::Transport)
/// sequences these calls and inserts the required waits.
pub trait SpiBus {
    /// Drives the chip-select line. `true` asserts select (line low).
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] if the line cannot be driven.
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError>;

    /// Clocks out every byte of `bytes` in order.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] on any driver failure.
    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError>;

    /// Clocks in up to `buf.len()` bytes and returns how many were received.
    ///
    /// # Errors
    ///
    /// Returns a [`BusError`] on any driver failure.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError> {
        (**self).set_select(asserted)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        (**self).read(buf)
    }
}

impl<T: SpiBus + ?Sized> SpiBus for Box<T> {
    fn set_select(&mut self, asserted: bool) -> Result<(), BusError> {
        (**self).set_select(asserted)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        (**self).read(buf)
    }
}

/// Blocking wait provider.
///
/// All timing in the harness is enforced by blocking the caller; there are no timers or
/// callbacks.
pub trait Delay {
    /// Blocks for at least `us` microseconds.
    fn delay_us(&mut self, us: u64);

    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_us(&mut self, us: u64) {
        (**self).delay_us(us);
    }

    fn delay_ms(&mut self, ms: u64) {
        (**self).delay_ms(ms);
    }
}
