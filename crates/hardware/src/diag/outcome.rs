//! Check verdicts and per-check outcomes.

use std::fmt;

use serde::Serialize;

/// Result of one diagnostic check.
///
/// Some effects of a check cannot be observed over the link (the core's execution of a
/// loaded program, for instance). Such checks report `Unverified`: it counts as a pass,
/// but is displayed as distinct from a check with a real pass/fail criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Observed behaviour matched expectations.
    Passed,
    /// Observed behaviour did not match, or the check errored.
    Failed,
    /// The check completed but its effect is not observable.
    Unverified,
}

impl Verdict {
    /// Maps a boolean criterion onto `Passed` / `Failed`.
    pub const fn from_bool(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }

    /// Whether this verdict counts towards the pass total.
    pub const fn is_pass(self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Console marker for this verdict.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Passed => "✓ PASS",
            Self::Failed => "✗ FAIL",
            Self::Unverified => "~ PASS",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Outcome of one check within a suite run. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    name: String,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TestOutcome {
    /// Outcome of a check that ran to completion.
    pub fn new(name: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            name: name.into(),
            verdict,
            error: None,
        }
    }

    /// Failing outcome of a check that raised an error instead of returning a verdict.
    pub fn errored(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Failed,
            error: Some(description.into()),
        }
    }

    /// Display name of the check.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Verdict of the check.
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Error description, if the check errored.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the check counts as passed.
    pub const fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8} - {}", self.verdict.marker(), self.name)?;
        if self.verdict == Verdict::Unverified {
            f.write_str(" (unverified)")?;
        }
        if let Some(error) = &self.error {
            write!(f, " (error: {error})")?;
        }
        Ok(())
    }
}
