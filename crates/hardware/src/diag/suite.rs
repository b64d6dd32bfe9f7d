//! Suite orchestration.
//!
//! Runs checks strictly in order with a fixed pause between them. Every check runs inside
//! its own result-capturing boundary: a [`BusError`](crate::common::BusError) or a panic
//! inside one check becomes a failing outcome carrying the error text, and the next check
//! runs regardless.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info};

use super::checks::Check;
use super::outcome::TestOutcome;
use super::report::SuiteReport;
use crate::bus::{Delay, SpiBus, Transport};
use crate::config::{Config, SuiteConfig};

/// An ordered list of checks plus the parameters they run with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suite {
    checks: Vec<Check>,
    config: SuiteConfig,
    pause_ms: u64,
}

impl Default for Suite {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Suite {
    /// The canonical suite: every [`Check`] in [`Check::ALL`] order.
    pub fn new(config: &Config) -> Self {
        Self::with_checks(Check::ALL.to_vec(), config)
    }

    /// A suite over an explicit list of checks.
    pub fn with_checks(checks: Vec<Check>, config: &Config) -> Self {
        Self {
            checks,
            config: config.suite,
            pause_ms: config.timing.inter_check_pause_ms,
        }
    }

    /// Registered checks, in run order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Runs every check and returns the report.
    ///
    /// Never fails: the report always holds exactly one outcome per registered check.
    pub fn run<B: SpiBus, D: Delay>(&self, transport: &mut Transport<B, D>) -> SuiteReport {
        info!(checks = self.checks.len(), "starting diagnostic suite");
        let mut report = SuiteReport::new();

        for (i, &check) in self.checks.iter().enumerate() {
            if i > 0 {
                transport.dwell(self.pause_ms);
            }
            report.record(run_check(check, transport, &self.config));
        }

        info!(
            passed = report.passed_count(),
            total = report.total_count(),
            "diagnostic suite finished"
        );
        report
    }
}

/// Runs one check inside an isolation boundary and returns its outcome.
///
/// Errors and panics raised by the check are converted into a failing outcome; nothing
/// escapes this function.
pub fn run_check<B: SpiBus, D: Delay>(
    check: Check,
    transport: &mut Transport<B, D>,
    config: &SuiteConfig,
) -> TestOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| check.run(transport, config)));
    let outcome = match result {
        Ok(Ok(verdict)) => TestOutcome::new(check.name(), verdict),
        Ok(Err(e)) => TestOutcome::errored(check.name(), e.to_string()),
        Err(payload) => TestOutcome::errored(check.name(), panic_message(&*payload)),
    };

    match outcome.error() {
        Some(description) => error!("✗ {check} ERROR: {description}"),
        None => info!("{outcome}"),
    }
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(
            || "check panicked".to_string(),
            |msg| format!("check panicked: {msg}"),
        )
}
