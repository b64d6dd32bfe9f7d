//! SPI diagnostic harness for the SERV RISC-V soft core.
//!
//! This crate drives a SERV core hosted on an FPGA from the host side of an SPI link:
//! 1. **Protocol:** The fixed 5-byte write frame (address, then data LSB first).
//! 2. **Bus:** A transport that sequences select, settle and completion delays over a
//!    host-supplied physical bus.
//! 3. **Loader:** Program loading, single-word writes and the reset sequence.
//! 4. **Diagnostics:** An ordered suite of independent checks with per-check failure
//!    isolation, and the report that aggregates their outcomes.
//! 5. **Peer model:** A simulated FPGA peer for dry runs and tests.
//!
//! # Example
//!
//! ```
//! use servdiag_core::bus::{NoDelay, Transport};
//! use servdiag_core::diag::Suite;
//! use servdiag_core::soc::SimulatedPeer;
//!
//! let mut transport = Transport::new(SimulatedPeer::new(), NoDelay);
//! let report = Suite::default().run(&mut transport);
//! assert!(report.overall_success());
//! ```

/// SPI bus capabilities and the timed transport.
pub mod bus;
/// Common types and constants (addresses, words, errors).
pub mod common;
/// Harness configuration (bus, timing, suite parameters).
pub mod config;
/// Diagnostic checks, suite orchestration and result aggregation.
pub mod diag;
/// Wire protocol (write frame encoding).
pub mod protocol;
/// Program loader, reset sequence and canned programs.
pub mod sim;
/// Simulated peer core.
pub mod soc;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Exclusive session over the SPI link.
pub use crate::bus::Transport;
/// Aggregated outcome of a diagnostic run.
pub use crate::diag::SuiteReport;
