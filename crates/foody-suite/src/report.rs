// crates/foody-suite/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-step pass/fail results of a suite run.
// Purpose: Summarize a run for humans and for JSON artifacts.
// Dependencies: serde
// ============================================================================

//! Per-step results and the text summary of a run.

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use crate::steps::StepOutcome;

/// Step result label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Every check passed.
    Pass,
    /// At least one check failed.
    Fail,
}

impl StepStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// Result of one step within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based position in the pipeline.
    pub order: usize,
    /// Stable step name.
    pub name: String,
    /// Overall result.
    pub status: StepStatus,
    /// Failure messages in the order observed.
    pub failures: Vec<String>,
    /// Informational notes.
    pub notes: Vec<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl StepReport {
    /// Builds a report entry from a step outcome.
    #[must_use]
    pub fn new(order: usize, name: &str, outcome: StepOutcome, elapsed: Duration) -> Self {
        let status = if outcome.passed() { StepStatus::Pass } else { StepStatus::Fail };
        Self {
            order,
            name: name.to_string(),
            status,
            failures: outcome.failures.into_iter().map(|failure| failure.message).collect(),
            notes: outcome.notes,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Step results in execution order.
    pub steps: Vec<StepReport>,
}

impl SuiteReport {
    /// Returns true when every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|step| step.status == StepStatus::Pass)
    }

    /// Returns the number of failed steps.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.status == StepStatus::Fail).count()
    }

    /// Returns the entry for a step name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|step| step.name == name)
    }

    /// Renders the per-step summary printed by the CLI.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let label = step.status.as_str().to_ascii_uppercase();
            let _ = writeln!(out, "[{label}] {} {} ({} ms)", step.order, step.name, step.duration_ms);
            for failure in &step.failures {
                let _ = writeln!(out, "    - {failure}");
            }
            for note in &step.notes {
                let _ = writeln!(out, "    note: {note}");
            }
        }
        let failed = self.failed_count();
        let _ = writeln!(
            out,
            "{} steps: {} passed, {failed} failed",
            self.steps.len(),
            self.steps.len().saturating_sub(failed)
        );
        out
    }
}
