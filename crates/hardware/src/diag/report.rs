//! Suite result aggregation.
//!
//! A [`SuiteReport`] accumulates one [`TestOutcome`] per check, in execution order. Outcomes
//! are only ever appended; nothing is removed or reordered.

use std::fmt;

use serde::{Serialize, Serializer};

use super::outcome::TestOutcome;

const RULE: &str = "============================================================";

/// Ordered outcomes of a diagnostic run with derived counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuiteReport {
    outcomes: Vec<TestOutcome>,
}

impl SuiteReport {
    /// Creates an empty report.
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Appends the outcome of the check that just finished.
    pub fn record(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in execution order.
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    /// Number of checks that passed (including unverified ones).
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of checks that failed or errored.
    pub fn failed_count(&self) -> usize {
        self.total_count() - self.passed_count()
    }

    /// Number of checks recorded.
    pub const fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    /// `true` iff every recorded check passed.
    pub fn overall_success(&self) -> bool {
        self.passed_count() == self.total_count()
    }

    /// Serialises the report, counts included, as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; not expected for this data.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SuiteReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            outcomes: &'a [TestOutcome],
            passed: usize,
            total: usize,
            overall_success: bool,
        }

        View {
            outcomes: &self.outcomes,
            passed: self.passed_count(),
            total: self.total_count(),
            overall_success: self.overall_success(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "TEST SUMMARY")?;
        writeln!(f, "{RULE}")?;
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Results: {}/{} tests passed",
            self.passed_count(),
            self.total_count()
        )?;
        if self.overall_success() {
            writeln!(f, "ALL TESTS PASSED")?;
        } else {
            writeln!(f, "{} test(s) failed", self.failed_count())?;
        }
        write!(f, "{RULE}")
    }
}
