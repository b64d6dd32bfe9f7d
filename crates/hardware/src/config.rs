//! Configuration for the diagnostic harness.
//!
//! This module defines all configuration structures used to parameterize a session. It
//! provides:
//! 1. **Defaults:** Bus parameters and the timing contract of the peer core.
//! 2. **Structures:** Hierarchical config for bus, timing and suite parameters.
//! 3. **Loading:** JSON deserialization and validation against the timing contract.
//!
//! Every field is optional in JSON; missing fields take their defaults, so `{}` is a valid
//! configuration equal to `Config::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants::{
    MIN_POST_SETTLE_US, MIN_PRE_SETTLE_US, MIN_READ_COMPLETION_US, MIN_WRITE_COMPLETION_US,
};

/// Default configuration constants for the harness.
mod defaults {
    /// SPI controller index on the host.
    pub const SPI_ID: u8 = 0;

    /// SPI clock rate in Hz (1 MHz).
    pub const BAUDRATE: u32 = 1_000_000;

    /// GPIO driving the active-low chip select.
    pub const CS_PIN: u8 = 1;

    /// Wait between asserting select and the first byte.
    pub const PRE_SETTLE_US: u64 = 2;

    /// Wait between the last byte and deasserting select.
    pub const POST_SETTLE_US: u64 = 2;

    /// Wait after a write frame for the peer to commit it (1 ms).
    pub const WRITE_COMPLETION_US: u64 = 1_000;

    /// Wait after a status read.
    pub const READ_COMPLETION_US: u64 = 10;

    /// Pause between consecutive suite checks.
    pub const INTER_CHECK_PAUSE_MS: u64 = 300;

    /// Status reads performed by the status-read check.
    pub const STATUS_READS: usize = 5;

    /// Writes performed by the throughput check.
    pub const THROUGHPUT_ITERATIONS: usize = 50;
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host bus parameters.
    #[serde(default)]
    pub bus: BusConfig,
    /// Transaction timing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Diagnostic suite parameters.
    #[serde(default)]
    pub suite: SuiteConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation errors of
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks the configuration against the bus timing contract.
    ///
    /// Timing values may be lengthened but never shortened below the minimums the peer
    /// logic was built for.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.suite.validate()
    }
}

/// Host SPI bus parameters.
///
/// The mode is fixed by the peer logic (mode 0, MSB first, 8-bit words) and not
/// configurable; these fields describe how the host reaches the peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
    /// SPI controller index
    #[serde(default = "BusConfig::default_spi_id")]
    pub spi_id: u8,

    /// SPI clock rate in Hz
    #[serde(default = "BusConfig::default_baudrate")]
    pub baudrate: u32,

    /// Chip-select GPIO number
    #[serde(default = "BusConfig::default_cs_pin")]
    pub cs_pin: u8,
}

impl BusConfig {
    fn default_spi_id() -> u8 {
        defaults::SPI_ID
    }

    fn default_baudrate() -> u32 {
        defaults::BAUDRATE
    }

    fn default_cs_pin() -> u8 {
        defaults::CS_PIN
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            spi_id: defaults::SPI_ID,
            baudrate: defaults::BAUDRATE,
            cs_pin: defaults::CS_PIN,
        }
    }
}

/// Per-transaction timing of the bus transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Wait after asserting select, in microseconds
    #[serde(default = "TimingConfig::default_pre_settle_us")]
    pub pre_settle_us: u64,

    /// Wait before deasserting select, in microseconds
    #[serde(default = "TimingConfig::default_post_settle_us")]
    pub post_settle_us: u64,

    /// Wait after a write frame, in microseconds
    #[serde(default = "TimingConfig::default_write_completion_us")]
    pub write_completion_us: u64,

    /// Wait after a status read, in microseconds
    #[serde(default = "TimingConfig::default_read_completion_us")]
    pub read_completion_us: u64,

    /// Pause between suite checks, in milliseconds
    #[serde(default = "TimingConfig::default_inter_check_pause_ms")]
    pub inter_check_pause_ms: u64,
}

impl TimingConfig {
    fn default_pre_settle_us() -> u64 {
        defaults::PRE_SETTLE_US
    }

    fn default_post_settle_us() -> u64 {
        defaults::POST_SETTLE_US
    }

    fn default_write_completion_us() -> u64 {
        defaults::WRITE_COMPLETION_US
    }

    fn default_read_completion_us() -> u64 {
        defaults::READ_COMPLETION_US
    }

    fn default_inter_check_pause_ms() -> u64 {
        defaults::INTER_CHECK_PAUSE_MS
    }

    /// Rejects any transaction delay below the contract minimum.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Timing`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("pre_settle_us", self.pre_settle_us, MIN_PRE_SETTLE_US),
            ("post_settle_us", self.post_settle_us, MIN_POST_SETTLE_US),
            (
                "write_completion_us",
                self.write_completion_us,
                MIN_WRITE_COMPLETION_US,
            ),
            (
                "read_completion_us",
                self.read_completion_us,
                MIN_READ_COMPLETION_US,
            ),
        ];
        for (field, value, min) in checks {
            if value < min {
                return Err(ConfigError::Timing { field, value, min });
            }
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pre_settle_us: defaults::PRE_SETTLE_US,
            post_settle_us: defaults::POST_SETTLE_US,
            write_completion_us: defaults::WRITE_COMPLETION_US,
            read_completion_us: defaults::READ_COMPLETION_US,
            inter_check_pause_ms: defaults::INTER_CHECK_PAUSE_MS,
        }
    }
}

/// Diagnostic suite parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Reads performed by the status-read check
    #[serde(default = "SuiteConfig::default_status_reads")]
    pub status_reads: usize,

    /// Writes performed by the throughput check
    #[serde(default = "SuiteConfig::default_throughput_iterations")]
    pub throughput_iterations: usize,
}

impl SuiteConfig {
    fn default_status_reads() -> usize {
        defaults::STATUS_READS
    }

    fn default_throughput_iterations() -> usize {
        defaults::THROUGHPUT_ITERATIONS
    }

    /// Rejects suite parameters that would make a check vacuous.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Suite`] naming the first zero-valued field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_reads == 0 {
            return Err(ConfigError::Suite {
                field: "status_reads",
            });
        }
        if self.throughput_iterations == 0 {
            return Err(ConfigError::Suite {
                field: "throughput_iterations",
            });
        }
        Ok(())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            status_reads: defaults::STATUS_READS,
            throughput_iterations: defaults::THROUGHPUT_ITERATIONS,
        }
    }
}
