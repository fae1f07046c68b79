// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Resolve artifact and timeout settings for stub and live runs.
// Dependencies: foody-suite
// ============================================================================

//! ## Overview
//! Reads the two `FOODY_SYSTEM_TEST_*` variables through the suite's strict
//! environment helpers, so invalid UTF-8 and blank values fail closed the
//! same way they do for a suite run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use foody_suite::config::parse_timeout_seconds;
use foody_suite::config::read_env_nonempty;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional artifact root override.
    RunRoot,
    /// Optional minimum request timeout in seconds (positive integer).
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "FOODY_SYSTEM_TEST_RUN_ROOT",
            Self::TimeoutSeconds => "FOODY_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional artifact root override.
    pub run_root: Option<PathBuf>,
    /// Optional minimum timeout.
    pub timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns the rendered configuration error when a value is not valid
    /// UTF-8, is blank, or is not a positive number of seconds.
    pub fn load() -> Result<Self, String> {
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())
            .map_err(|err| err.to_string())?
            .map(PathBuf::from);
        let name = SystemTestEnv::TimeoutSeconds.as_str();
        let timeout = read_env_nonempty(name)
            .and_then(|raw| raw.map(|value| parse_timeout_seconds(name, &value)).transpose())
            .map_err(|err| err.to_string())?;
        Ok(Self {
            run_root,
            timeout,
        })
    }

    /// Returns `requested`, raised to the configured minimum when one is set.
    #[must_use]
    pub fn resolve_timeout(&self, requested: Duration) -> Duration {
        self.timeout.map_or(requested, |minimum| requested.max(minimum))
    }
}
