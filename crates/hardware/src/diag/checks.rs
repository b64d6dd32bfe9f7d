//! Individual diagnostic checks.
//!
//! Each check is an independent unit: it issues transactions, waits for the peer to react,
//! compares what it observed against an expected pattern, and returns a single
//! [`Verdict`]. Checks never award partial credit and never retry.
//!
//! The peer returns a single fixed status byte and offers no memory read-back, so only
//! the status-read check has an observable pass/fail criterion. Write checks pass once
//! every frame went out without a bus error; execution checks report
//! [`Verdict::Unverified`].

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use super::outcome::Verdict;
use crate::bus::{Delay, SpiBus, Transport};
use crate::common::constants::{
    BOOTSTRAP_DWELL_MS, DATA_PATTERN_STEP, DATA_REGION_BASE, DATA_REGION_LEN,
    LOOP_PROGRAM_DWELL_MS, MEMORY_WRITE_GAP_MS, STATUS_READ_GAP_MS, STORE_PROGRAM_DWELL_MS,
    THROUGHPUT_PATTERN_STEP,
};
use crate::common::{BusError, MemAddr, STATUS_SENTINEL, Word};
use crate::config::SuiteConfig;
use crate::sim::{load_program, programs};

/// Address/value pairs written by the memory-write check.
pub const MEMORY_WRITE_TABLE: [(u8, Word); 5] = [
    (0, 0x1234_5678),
    (1, 0xDEAD_BEEF),
    (2, 0xCAFE_BABE),
    (10, 0xABCD_EF00),
    (255, 0xFFFF_FFFF),
];

/// The canonical diagnostic checks, in suite order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Check {
    /// Repeated status reads expecting the 0xA5 sentinel.
    StatusRead,
    /// Writes of a fixed address/value table.
    MemoryWrite,
    /// Dwell while the core runs its built-in startup routine.
    Bootstrap,
    /// Loads and runs the fixed-value store program.
    StoreProgram,
    /// Loads and runs the counting loop program.
    CountingLoop,
    /// Writes a deterministic pattern into the data region.
    DataPattern,
    /// Timed burst of writes across the address space.
    Throughput,
}

/// A check name that matches none of the canonical checks.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown check `{0}`")]
pub struct UnknownCheck(pub String);

impl Check {
    /// Every check, in the order the suite runs them.
    pub const ALL: [Self; 7] = [
        Self::StatusRead,
        Self::MemoryWrite,
        Self::Bootstrap,
        Self::StoreProgram,
        Self::CountingLoop,
        Self::DataPattern,
        Self::Throughput,
    ];

    /// Human-readable name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::StatusRead => "Basic SPI Communication",
            Self::MemoryWrite => "Memory Write (32-bit)",
            Self::Bootstrap => "CPU Bootstrap Check",
            Self::StoreProgram => "Simple Custom Program",
            Self::CountingLoop => "Counting Loop Program",
            Self::DataPattern => "Data Memory Write",
            Self::Throughput => "Stress Test",
        }
    }

    /// Short identifier accepted on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::StatusRead => "status",
            Self::MemoryWrite => "memory",
            Self::Bootstrap => "bootstrap",
            Self::StoreProgram => "store",
            Self::CountingLoop => "loop",
            Self::DataPattern => "pattern",
            Self::Throughput => "throughput",
        }
    }

    /// Runs the check against the peer.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BusError`]; the suite converts it into a failing outcome.
    pub fn run<B: SpiBus, D: Delay>(
        self,
        transport: &mut Transport<B, D>,
        config: &SuiteConfig,
    ) -> Result<Verdict, BusError> {
        info!("=== {} ===", self.name());
        match self {
            Self::StatusRead => status_read(transport, config.status_reads)
                .map(|tally| Verdict::from_bool(tally.passed())),
            Self::MemoryWrite => memory_write(transport),
            Self::Bootstrap => Ok(bootstrap(transport)),
            Self::StoreProgram => store_program(transport),
            Self::CountingLoop => counting_loop(transport),
            Self::DataPattern => data_pattern(transport),
            Self::Throughput => {
                throughput(transport, config.throughput_iterations).map(|_| Verdict::Passed)
            }
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Check {
    type Err = UnknownCheck;

    /// Accepts either the slug or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCheck(s.to_string()))
    }
}

/// Tally of a status-read run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusTally {
    /// Reads that returned the sentinel.
    pub matched: usize,
    /// Reads performed.
    pub reads: usize,
}

impl StatusTally {
    /// All reads matched (and at least one read happened).
    pub const fn passed(&self) -> bool {
        self.reads > 0 && self.matched == self.reads
    }
}

/// Reads the status byte `reads` times, expecting [`STATUS_SENTINEL`] every time.
///
/// Every read is performed even after a mismatch, so the tally reflects the whole run.
///
/// # Errors
///
/// Returns the first [`BusError`].
pub fn status_read<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
    reads: usize,
) -> Result<StatusTally, BusError> {
    let mut tally = StatusTally { matched: 0, reads };
    for i in 1..=reads {
        let status = transport.read_status_byte()?;
        if status == STATUS_SENTINEL {
            info!("✓ Read #{i}: {status:#04X}");
            tally.matched += 1;
        } else {
            warn!("✗ Read #{i}: {status:#04X} (expected {STATUS_SENTINEL:#04X})");
        }
        transport.dwell(STATUS_READ_GAP_MS);
    }
    info!("{}/{} reads correct", tally.matched, tally.reads);
    Ok(tally)
}

/// Writes [`MEMORY_WRITE_TABLE`].
///
/// # Errors
///
/// Returns the first [`BusError`]; later entries are not written.
pub fn memory_write<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
) -> Result<Verdict, BusError> {
    for (addr, data) in MEMORY_WRITE_TABLE {
        transport.write_word(MemAddr::new(addr), data)?;
        info!("✓ Address {addr:3}: {data:#010X}");
        transport.dwell(MEMORY_WRITE_GAP_MS);
    }
    Ok(Verdict::Passed)
}

/// Waits for the core's built-in startup routine. Issues no transactions.
pub fn bootstrap<B: SpiBus, D: Delay>(transport: &mut Transport<B, D>) -> Verdict {
    info!("waiting {BOOTSTRAP_DWELL_MS} ms for the bootstrap routine");
    transport.dwell(BOOTSTRAP_DWELL_MS);
    Verdict::Unverified
}

/// Loads [`programs::STORE_BYTE`] at address 0 and lets it run.
///
/// # Errors
///
/// Returns the first [`BusError`] from the load.
pub fn store_program<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
) -> Result<Verdict, BusError> {
    load_program(transport, &programs::STORE_BYTE, MemAddr::MIN)?;
    transport.dwell(STORE_PROGRAM_DWELL_MS);
    Ok(Verdict::Unverified)
}

/// Loads [`programs::COUNTING_LOOP`] at address 0 and lets it run.
///
/// # Errors
///
/// Returns the first [`BusError`] from the load.
pub fn counting_loop<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
) -> Result<Verdict, BusError> {
    load_program(transport, &programs::COUNTING_LOOP, MemAddr::MIN)?;
    transport.dwell(LOOP_PROGRAM_DWELL_MS);
    Ok(Verdict::Unverified)
}

/// Word written at offset `i` of the data region: `0x11111111 * (i + 1)`, truncated.
pub const fn data_pattern_word(i: usize) -> Word {
    DATA_PATTERN_STEP.wrapping_mul((i as Word).wrapping_add(1))
}

/// Writes [`data_pattern_word`] to addresses 100..116.
///
/// # Errors
///
/// Returns the first [`BusError`].
pub fn data_pattern<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
) -> Result<Verdict, BusError> {
    let base = MemAddr::new(DATA_REGION_BASE);
    for i in 0..DATA_REGION_LEN {
        let addr = base.offset(i);
        let data = data_pattern_word(i);
        transport.write_word(addr, data)?;
        if i % 4 == 0 {
            info!("Address {addr}: {data:#010X}");
        }
    }
    info!("data memory pattern written");
    Ok(Verdict::Passed)
}

/// Timing figures from a throughput run. Informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThroughputSummary {
    /// Writes issued.
    pub writes: usize,
    /// Wall-clock time from first to last write.
    pub elapsed: Duration,
}

impl ThroughputSummary {
    /// Average time per write in milliseconds.
    pub fn avg_ms(&self) -> f64 {
        if self.writes == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1_000.0 / self.writes as f64
    }

    /// Writes per second, or `None` if no measurable time elapsed.
    pub fn writes_per_sec(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.writes as f64 / secs)
    }
}

/// Issues `iterations` writes of `i * 0x01010101` to address `i mod 256`.
///
/// # Errors
///
/// Returns the first [`BusError`]. Elapsed time never causes a failure.
pub fn throughput<B: SpiBus, D: Delay>(
    transport: &mut Transport<B, D>,
    iterations: usize,
) -> Result<ThroughputSummary, BusError> {
    let start = Instant::now();
    for i in 0..iterations {
        let data = THROUGHPUT_PATTERN_STEP.wrapping_mul(i as Word);
        transport.write_word(MemAddr::MIN.offset(i), data)?;
        if (i + 1) % 10 == 0 {
            info!("progress: {}/{iterations}", i + 1);
        }
    }
    let summary = ThroughputSummary {
        writes: iterations,
        elapsed: start.elapsed(),
    };

    info!(
        "{} writes in {} ms (avg {:.2} ms/write)",
        summary.writes,
        summary.elapsed.as_millis(),
        summary.avg_ms()
    );
    if let Some(rate) = summary.writes_per_sec() {
        info!("rate: {rate:.1} writes/sec");
    }
    Ok(summary)
}

/// Quick link check: one status read, then the memory-write table.
///
/// Returns whether the status byte matched. A mismatch is logged with wiring hints but does
/// not stop the writes.
///
/// # Errors
///
/// Returns the first [`BusError`].
pub fn quick_test<B: SpiBus, D: Delay>(transport: &mut Transport<B, D>) -> Result<bool, BusError> {
    let status = transport.read_status_byte()?;
    let healthy = status == STATUS_SENTINEL;
    if healthy {
        info!("✓ SPI read OK: {status:#04X}");
    } else {
        warn!("✗ SPI read failed: got {status:#04X}, expected {STATUS_SENTINEL:#04X}");
        warn!("  check SPI wiring (MISO line)");
        warn!("  verify the FPGA bitstream is loaded");
    }
    let _ = memory_write(transport)?;
    info!("quick test complete");
    Ok(healthy)
}
