// crates/foody-cli/src/main.rs
// ============================================================================
// Module: Foody CLI Entry Point
// Description: Command dispatcher for running the Food API suite.
// Purpose: Run the ordered suite once against a configured API and report.
// Dependencies: clap, foody-suite, serde_json, thiserror, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! The Foody CLI resolves configuration from flags and environment, runs the
//! seven-step suite once, prints a per-step summary to stdout, and optionally
//! writes the JSON report and the request transcript. Exit codes: 0 when all
//! steps pass, 1 when any step fails, 2 on configuration or setup errors.
//! Failing to write output after a run is logged and does not change the code.
//! Security posture: the password is only accepted through the environment.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use foody_suite::ConfigOverrides;
use foody_suite::Pipeline;
use foody_suite::SuiteConfig;
use foody_suite::SuiteError;
use foody_suite::SuiteReport;
use foody_suite::SuiteRun;
use foody_suite::SuiteStep;
use foody_suite::run_suite;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code when every step passed.
const EXIT_SUCCESS: u8 = 0;
/// Exit code when at least one step failed.
const EXIT_STEP_FAILURE: u8 = 1;
/// Exit code for configuration or setup errors.
const EXIT_SETUP_FAILURE: u8 = 2;
/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "foody", version, disable_help_subcommand = true)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the ordered suite once against the configured API.
    Run(RunCommand),
    /// List the suite steps in execution order.
    Steps,
}

/// Arguments for `foody run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// API base URL (overrides `FOODY_BASE_URL`).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Account user name (overrides `FOODY_USERNAME`).
    #[arg(long, value_name = "NAME")]
    username: Option<String>,
    /// Environment variable holding the password (default `FOODY_PASSWORD`).
    #[arg(long, value_name = "VAR")]
    password_env: Option<String>,
    /// Request timeout in seconds (overrides `FOODY_TIMEOUT_SEC`).
    #[arg(long, value_name = "SECONDS")]
    timeout_sec: Option<u64>,
    /// Write the JSON report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Write the request transcript to this path.
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,
}

impl RunCommand {
    /// Maps flags onto configuration overrides.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password_env: self.password_env.clone(),
            timeout_secs: self.timeout_sec,
        }
    }
}

/// CLI errors.
#[derive(Debug, Error)]
enum CliError {
    /// Suite could not start.
    #[error(transparent)]
    Suite(#[from] SuiteError),
    /// Output could not be written.
    #[error("failed to write {target}: {source}")]
    Output {
        /// Output path or stream name.
        target: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Output could not be serialized.
    #[error("failed to serialize {target}: {message}")]
    Serialize {
        /// Output path.
        target: String,
        /// Serializer error.
        message: String,
    },
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let result = run(cli.command).await;
    if let Err(err) = &result {
        emit_error(&err.to_string());
    }
    ExitCode::from(exit_code_for(&result))
}

/// Executes the selected command and returns its exit status.
async fn run(command: Commands) -> CliResult<u8> {
    match command {
        Commands::Run(command) => command_run(command).await,
        Commands::Steps => command_steps(),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs the suite and reports.
async fn command_run(command: RunCommand) -> CliResult<u8> {
    let config = SuiteConfig::load_with(&command.overrides()).map_err(SuiteError::from)?;
    tracing::info!(base_url = %config.base_url, "starting foody suite");
    let outcome = run_suite(&config, &Pipeline::standard()).await?;
    Ok(finish_run(&command, &outcome))
}

/// Prints the pipeline order with each step's state dependencies.
fn command_steps() -> CliResult<u8> {
    write_stdout(&render_steps(&Pipeline::standard()))?;
    Ok(EXIT_SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a report to the process exit status.
fn exit_status_for(report: &SuiteReport) -> u8 {
    if report.passed() { EXIT_SUCCESS } else { EXIT_STEP_FAILURE }
}

/// Maps a command result to the process exit status.
const fn exit_code_for(result: &CliResult<u8>) -> u8 {
    match result {
        Ok(code) => *code,
        Err(_) => EXIT_SETUP_FAILURE,
    }
}

/// Emits the summary and requested artifacts of a completed run.
///
/// Output failures are logged and leave the step-based exit status intact.
fn finish_run(command: &RunCommand, outcome: &SuiteRun) -> u8 {
    let mut writes = vec![write_stdout(&outcome.report.render_text())];
    if let Some(path) = &command.report {
        writes.push(write_json(path, &outcome.report));
    }
    if let Some(path) = &command.transcript {
        writes.push(write_json(path, &outcome.transcript));
    }
    for err in writes.into_iter().filter_map(Result::err) {
        tracing::warn!(error = %err, "run output not written");
    }
    exit_status_for(&outcome.report)
}

/// Renders one line per step with its required and provided state.
fn render_steps(pipeline: &Pipeline) -> String {
    let mut out = String::new();
    for (index, step) in pipeline.steps().iter().copied().enumerate() {
        out.push_str(&format!("{} {}{}\n", index + 1, step.name(), step_state_suffix(step)));
    }
    out
}

/// Describes the state a step reads and writes.
fn step_state_suffix(step: SuiteStep) -> String {
    let join = |keys: &[foody_suite::StateKey]| {
        keys.iter().map(|key| key.as_str()).collect::<Vec<_>>().join(", ")
    };
    let mut suffix = String::new();
    if !step.requires().is_empty() {
        suffix.push_str(&format!(" requires [{}]", join(step.requires())));
    }
    if !step.provides().is_empty() {
        suffix.push_str(&format!(" provides [{}]", join(step.provides())));
    }
    suffix
}

/// Serializes `value` as pretty JSON to `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let target = path.display().to_string();
    let bytes = serde_json::to_vec_pretty(value).map_err(|err| CliError::Serialize {
        target: target.clone(),
        message: err.to_string(),
    })?;
    fs::write(path, bytes).map_err(|source| CliError::Output {
        target,
        source,
    })
}

/// Writes text to stdout.
fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).map_err(|source| CliError::Output {
        target: "stdout".to_string(),
        source,
    })
}

/// Writes an error line to stderr.
fn emit_error(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "foody: {message}");
}
