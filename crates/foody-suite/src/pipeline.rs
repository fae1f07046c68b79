// crates/foody-suite/src/pipeline.rs
// ============================================================================
// Module: Step Pipeline
// Description: Ordered, dependency-checked execution of suite steps.
// Purpose: Run every step in sequence and fail loudly when misordered.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`Pipeline`] is validated at construction: every state key a step
//! requires must be provided by an earlier step. At run time steps execute
//! strictly in order and a failing step never stops the ones after it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::time::Instant;

use thiserror::Error;
use tracing::Instrument;

use crate::context::StateKey;
use crate::context::SuiteContext;
use crate::report::StepReport;
use crate::report::SuiteReport;
use crate::steps::SuiteStep;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pipeline construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The pipeline has no steps.
    #[error("pipeline has no steps")]
    Empty,
    /// A step reads state that no earlier step writes.
    #[error("step {position} ({step}) requires {key} but no earlier step provides it")]
    UnsatisfiedDependency {
        /// 1-based position of the step.
        position: usize,
        /// Step name.
        step: &'static str,
        /// Missing state.
        key: StateKey,
    },
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Validated ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Steps in execution order.
    steps: Vec<SuiteStep>,
}

impl Pipeline {
    /// Validates and builds a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the list is empty or a step requires
    /// state that no earlier step provides.
    pub fn new(steps: Vec<SuiteStep>) -> Result<Self, PipelineError> {
        if steps.is_empty() {
            return Err(PipelineError::Empty);
        }
        let mut provided = BTreeSet::new();
        for (index, step) in steps.iter().enumerate() {
            if let Some(key) = step.requires().iter().find(|key| !provided.contains(*key)) {
                return Err(PipelineError::UnsatisfiedDependency {
                    position: index + 1,
                    step: step.name(),
                    key: *key,
                });
            }
            provided.extend(step.provides().iter().copied());
        }
        Ok(Self {
            steps,
        })
    }

    /// Returns the seven cases in their required order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            steps: SuiteStep::STANDARD.to_vec(),
        }
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[SuiteStep] {
        &self.steps
    }

    /// Runs every step in order against the context.
    pub async fn run(&self, ctx: &mut SuiteContext) -> SuiteReport {
        let mut report = SuiteReport::default();
        for (index, step) in self.steps.iter().copied().enumerate() {
            let order = index + 1;
            let span = tracing::info_span!("step", order, name = step.name());
            let started = Instant::now();
            let outcome = step.run(ctx).instrument(span).await;
            if outcome.passed() {
                tracing::info!(order, name = step.name(), "step passed");
            } else {
                tracing::warn!(
                    order,
                    name = step.name(),
                    failures = outcome.failures.len(),
                    "step failed"
                );
            }
            report.steps.push(StepReport::new(order, step.name(), outcome, started.elapsed()));
        }
        report
    }
}
