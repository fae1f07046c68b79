// crates/foody-suite/src/lib.rs
// ============================================================================
// Module: Foody Suite
// Description: Ordered end-to-end suite for the Food CRUD API.
// Purpose: Sequence create/edit/list/delete cases over one authenticated session.
// Dependencies: foody-client, rand, serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! The suite authenticates once, then runs seven cases in a fixed order over
//! a shared [`SuiteContext`]. The create case records the new food id that
//! the edit and delete cases consume; the remaining cases probe validation
//! and not-found behavior with the sentinel id `-1`.
//!
//! Order is validated up front by [`Pipeline::new`]. At run time every case
//! executes regardless of earlier failures, and each reports its own result.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod context;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod steps;
pub mod validate;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use config::FoodyEnv;
pub use config::SuiteConfig;
pub use context::StateKey;
pub use context::SuiteContext;
pub use pipeline::Pipeline;
pub use pipeline::PipelineError;
pub use report::StepReport;
pub use report::StepStatus;
pub use report::SuiteReport;
pub use runner::SuiteError;
pub use runner::SuiteRun;
pub use runner::run_suite;
pub use runner::run_with_context;
pub use steps::StepOutcome;
pub use steps::SuiteStep;
