//! Delay providers.

use std::thread;
use std::time::Duration;

use super::traits::Delay;

/// Delay backed by [`std::thread::sleep`].
///
/// Sleeps are at least as long as requested, which is all the timing contract needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_us(&mut self, us: u64) {
        thread::sleep(Duration::from_micros(us));
    }

    fn delay_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Delay that returns immediately.
///
/// For dry runs against the [`SimulatedPeer`](crate::soc::SimulatedPeer), which commits
/// frames synchronously and needs no settle time.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay_us(&mut self, _us: u64) {}

    fn delay_ms(&mut self, _ms: u64) {}
}
