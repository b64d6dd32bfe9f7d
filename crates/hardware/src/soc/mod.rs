//! Peer-side models.
//!
//! This module holds the simulated FPGA peer used for dry runs and tests in place of a
//! host SPI driver.

/// Simulated SERV SPI slave.
pub mod peer;

pub use peer::{PEER_MEMORY_WORDS, SimulatedPeer};
