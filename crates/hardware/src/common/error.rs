//! Error types for the bus path and for configuration.
//!
//! This module defines the failure taxonomy of the harness. It provides:
//! 1. **Bus Errors:** The single error kind raised by transport, loader and checks.
//! 2. **Configuration Errors:** Failures reading, parsing or validating a config file.
//! 3. **Program Errors:** Failures parsing a program listing.

use std::io;

use thiserror::Error;

/// Any failure of the underlying bus capability.
///
/// The transport never retries; a `BusError` always reaches the caller of the operation
/// that triggered it, except inside the diagnostic suite where it becomes a failing outcome.
#[derive(Debug, Error)]
pub enum BusError {
    /// The host-side driver reported an I/O failure.
    #[error("bus I/O failure: {0}")]
    Io(#[from] io::Error),

    /// The peripheral stopped responding.
    #[error("peripheral disconnected")]
    Disconnected,

    /// Fewer bytes were clocked out than the frame holds.
    #[error("short write: {written} of {expected} bytes transmitted")]
    ShortWrite {
        /// Bytes the transport asked the driver to send.
        expected: usize,
        /// Bytes the driver reports as sent.
        written: usize,
    },

    /// The select line could not be driven.
    #[error("select line fault: {0}")]
    SelectLine(String),

    /// A transfer was attempted while select was deasserted.
    #[error("transfer attempted with select deasserted")]
    NotSelected,
}

/// Failure loading or validating a [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid JSON for the expected schema.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A timing value is shorter than the bus contract allows.
    #[error("timing.{field} = {value} is below the minimum of {min}")]
    Timing {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: u64,
        /// Contract minimum.
        min: u64,
    },

    /// A suite parameter is out of range.
    #[error("suite.{field} must be at least 1")]
    Suite {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Failure parsing a program listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramParseError {
    /// A line is not a valid 32-bit number.
    #[error("line {line}: `{text}` is not a 32-bit word")]
    InvalidWord {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        text: String,
    },

    /// The listing holds more words than the address space.
    #[error("program has {0} words; at most 256 fit in peer memory")]
    TooLong(usize),
}
