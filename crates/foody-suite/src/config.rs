// crates/foody-suite/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Environment-backed configuration for a suite run.
// Purpose: Resolve base URL, credentials, and timeout with strict validation.
// Dependencies: foody-client, thiserror, url
// ============================================================================

//! ## Overview
//! Configuration is read from environment variables, with optional overrides
//! supplied by the caller (the CLI maps its flags onto [`ConfigOverrides`]).
//! Values are parsed with strict UTF-8 enforcement; empty or invalid values
//! fail closed and name the offending variable.
//! Security posture: the password is only ever read from the environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use foody_client::ClientSettings;
use foody_client::Credentials;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URL used when `FOODY_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str =
    "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:86";

/// Environment keys for suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodyEnv {
    /// Optional API base URL override.
    BaseUrl,
    /// Account user name.
    Username,
    /// Account password.
    Password,
    /// Optional timeout in seconds (positive integer).
    TimeoutSeconds,
}

impl FoodyEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "FOODY_BASE_URL",
            Self::Username => "FOODY_USERNAME",
            Self::Password => "FOODY_PASSWORD",
            Self::TimeoutSeconds => "FOODY_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value was not provided.
    #[error("{0} must be set")]
    Missing(String),
    /// A value was provided but failed validation.
    #[error("{name} {reason}")]
    Invalid {
        /// Variable or flag name.
        name: String,
        /// Validation failure.
        reason: String,
    },
}

impl ConfigError {
    /// Builds an [`ConfigError::Invalid`] for a named source.
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Caller-supplied values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Base URL override.
    pub base_url: Option<String>,
    /// User name override.
    pub username: Option<String>,
    /// Name of the variable holding the password (defaults to `FOODY_PASSWORD`).
    pub password_env: Option<String>,
    /// Timeout override in seconds.
    pub timeout_secs: Option<u64>,
}

/// Typed suite configuration.
///
/// # Invariants
/// - `Debug` output redacts the password through [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Validated absolute base URL.
    pub base_url: String,
    /// Account credentials.
    pub credentials: Credentials,
    /// Request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl SuiteConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, fails
    /// validation, or when credentials are missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&ConfigOverrides::default())
    }

    /// Loads configuration, preferring `overrides` over the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, fails
    /// validation, or when credentials are missing.
    pub fn load_with(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let base_url = match &overrides.base_url {
            Some(value) => non_empty("--base-url", value.clone())?,
            None => read_env_nonempty(FoodyEnv::BaseUrl.as_str())?
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = validate_base_url(&base_url)?;

        let username = match &overrides.username {
            Some(value) => non_empty("--username", value.clone())?,
            None => read_env_nonempty(FoodyEnv::Username.as_str())?
                .ok_or_else(|| ConfigError::Missing(FoodyEnv::Username.as_str().to_string()))?,
        };

        let password_env =
            overrides.password_env.as_deref().unwrap_or(FoodyEnv::Password.as_str());
        let password = read_env_nonempty(password_env)?
            .ok_or_else(|| ConfigError::Missing(password_env.to_string()))?;

        let timeout = match overrides.timeout_secs {
            Some(0) => return Err(ConfigError::invalid("--timeout-sec", "must be greater than zero")),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => read_env_nonempty(FoodyEnv::TimeoutSeconds.as_str())?
                .map(|value| parse_timeout_seconds(FoodyEnv::TimeoutSeconds.as_str(), &value))
                .transpose()?,
        };

        Ok(Self {
            base_url,
            credentials: Credentials::new(username, password),
            timeout,
        })
    }

    /// Returns the transport settings for the client.
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        let settings = ClientSettings::new(self.base_url.clone());
        match self.timeout {
            Some(timeout) => settings.with_timeout(timeout),
            None => settings,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::invalid(name, "must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the value is not valid UTF-8 or is blank.
pub fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    read_env_strict(name)?.map(|value| non_empty(name, value)).transpose()
}

/// Rejects empty or whitespace-only values.
fn non_empty(name: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(name, "must not be empty"));
    }
    Ok(value)
}

/// Checks that the base URL is an absolute http(s) URL.
fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let name = FoodyEnv::BaseUrl.as_str();
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::invalid(name, format!("is not a valid url: {err}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::invalid(name, format!("must use http or https, not {other}"))),
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid(name, "must include a host"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(name, "must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(ConfigError::invalid(name, "must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
