// crates/foody-suite/src/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: One-shot setup, pipeline execution, and teardown.
// Purpose: Bracket the ordered steps with authentication and client release.
// Dependencies: foody-client, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`run_suite`] authenticates exactly once, runs the pipeline, and releases
//! the client. Authentication failure aborts the run with
//! [`SuiteError::Setup`]; step failures never do.

use foody_client::ClientError;
use foody_client::FoodyClient;
use foody_client::TranscriptEntry;
use thiserror::Error;

use crate::config::ConfigError;
use crate::config::SuiteConfig;
use crate::context::SuiteContext;
use crate::pipeline::Pipeline;
use crate::report::SuiteReport;

/// Errors that abort a run before or instead of running steps.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Authentication failed; no step can run.
    #[error("suite setup failed: {0}")]
    Setup(#[from] ClientError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct SuiteRun {
    /// Per-step results.
    pub report: SuiteReport,
    /// Every authenticated exchange, in order.
    pub transcript: Vec<TranscriptEntry>,
}

/// Authenticates, runs the pipeline once, and tears the client down.
///
/// # Errors
///
/// Returns [`SuiteError::Setup`] when authentication fails.
pub async fn run_suite(config: &SuiteConfig, pipeline: &Pipeline) -> Result<SuiteRun, SuiteError> {
    let client = FoodyClient::connect(&config.client_settings(), &config.credentials).await?;
    Ok(run_with_context(SuiteContext::new(client), pipeline).await)
}

/// Runs the pipeline on an existing context and tears the client down.
pub async fn run_with_context(mut ctx: SuiteContext, pipeline: &Pipeline) -> SuiteRun {
    let report = pipeline.run(&mut ctx).await;
    let transcript = ctx.into_client().close();
    tracing::info!(
        steps = report.steps.len(),
        failed = report.failed_count(),
        exchanges = transcript.len(),
        "suite finished"
    );
    SuiteRun {
        report,
        transcript,
    }
}
