//! Protocol and diagnostic constants.
//!
//! Values fixed by the peer core's SPI logic and by the diagnostic procedure. Timing
//! values that may be lengthened at runtime live in [`crate::config::TimingConfig`]; the
//! minimums here are the contract those values are validated against.

/// Length of a write frame in bytes: one address byte plus four data bytes.
pub const FRAME_LEN: usize = 5;

/// Status byte returned by a healthy peer on every single-byte read.
pub const STATUS_SENTINEL: u8 = 0xA5;

/// Canonical RV32I no-op (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Number of slots cleared by the reset sequence.
pub const RESET_LEN: usize = 16;

/// Minimum wait after asserting select and before the first clock edge (microseconds).
pub const MIN_PRE_SETTLE_US: u64 = 2;

/// Minimum wait after the last byte and before deasserting select (microseconds).
pub const MIN_POST_SETTLE_US: u64 = 2;

/// Minimum wait after a write frame for the peer to commit it (microseconds).
pub const MIN_WRITE_COMPLETION_US: u64 = 1_000;

/// Minimum wait after a status read (microseconds).
pub const MIN_READ_COMPLETION_US: u64 = 10;

/// Gap after each status read in the status-read check (milliseconds).
pub const STATUS_READ_GAP_MS: u64 = 50;

/// Gap after each write in the memory-write check (milliseconds).
pub const MEMORY_WRITE_GAP_MS: u64 = 20;

/// Dwell time for the built-in bootstrap routine (milliseconds).
pub const BOOTSTRAP_DWELL_MS: u64 = 500;

/// Dwell time after loading the fixed-value store program (milliseconds).
pub const STORE_PROGRAM_DWELL_MS: u64 = 100;

/// Dwell time after loading the counting loop program (milliseconds).
pub const LOOP_PROGRAM_DWELL_MS: u64 = 200;

/// First address of the data region exercised by the pattern check.
pub const DATA_REGION_BASE: u8 = 100;

/// Number of words written by the pattern check.
pub const DATA_REGION_LEN: usize = 16;

/// Multiplier of the data region pattern (`0x11111111 * (i + 1)`).
pub const DATA_PATTERN_STEP: u32 = 0x1111_1111;

/// Multiplier of the throughput check payload (`i * 0x01010101`).
pub const THROUGHPUT_PATTERN_STEP: u32 = 0x0101_0101;
