//! Diagnostic checks, orchestration and reporting.
//!
//! This module implements the test-sequence engine:
//! 1. **Checks:** Independent "issue transaction, wait, compare" units.
//! 2. **Outcomes:** Verdict kinds, including unverifiable passes.
//! 3. **Suite:** Sequential orchestration with per-check failure isolation.
//! 4. **Report:** Ordered aggregation of outcomes and the final verdict.

/// Individual checks.
pub mod checks;

/// Verdicts and outcomes.
pub mod outcome;

/// Result aggregation.
pub mod report;

/// Suite orchestration.
pub mod suite;

pub use checks::{Check, StatusTally, ThroughputSummary, UnknownCheck, quick_test};
pub use outcome::{TestOutcome, Verdict};
pub use report::SuiteReport;
pub use suite::{Suite, run_check};
