// crates/foody-client/src/auth.rs
// ============================================================================
// Module: Token Acquirer
// Description: One-time authentication against the Food API.
// Purpose: Exchange credentials for a bearer token before any other call.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! Issues a single unauthenticated `POST /api/User/Authentication` and extracts
//! `accessToken` from the reply. Any failure here is fatal for a suite run, so
//! nothing is retried.
//! Security posture: the password and the token never appear in `Debug`
//! output, logs, or transcripts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::client::join_url;
use crate::error::ClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Authentication endpoint path.
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

/// Reply field carrying the bearer token.
const ACCESS_TOKEN_FIELD: &str = "accessToken";

// ============================================================================
// SECTION: Types
// ============================================================================

/// User credentials for the authentication endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account user name.
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Builds credentials from a user name and password.
    #[must_use]
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token returned by the authentication endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// ============================================================================
// SECTION: Token Acquisition
// ============================================================================

/// Authenticates and returns the bearer token.
///
/// # Errors
///
/// Returns [`ClientError::Authentication`] with the status and raw body on a
/// non-2xx reply, [`ClientError::Protocol`] when the reply has no string
/// `accessToken`, and [`ClientError::Transport`] when the request fails.
pub async fn acquire_token(
    http: &Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken, ClientError> {
    let url = join_url(base_url, AUTHENTICATION_PATH)?;
    tracing::debug!(user = %credentials.user_name, "requesting access token");
    let response = http
        .post(url)
        .json(credentials)
        .send()
        .await
        .map_err(|err| ClientError::Transport(format!("authentication request failed: {err}")))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ClientError::Transport(format!("authentication reply unreadable: {err}")))?;
    if !status.is_success() {
        return Err(ClientError::Authentication {
            status: status.as_u16(),
            body,
        });
    }
    extract_access_token(&body)
}

/// Extracts `accessToken` from an authentication reply body.
///
/// # Errors
///
/// Returns [`ClientError::Protocol`] when the body is not JSON or lacks a
/// string `accessToken`.
pub fn extract_access_token(body: &str) -> Result<AccessToken, ClientError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| ClientError::Protocol(format!("authentication reply is not json: {err}")))?;
    value
        .get(ACCESS_TOKEN_FIELD)
        .and_then(Value::as_str)
        .map(AccessToken::new)
        .ok_or_else(|| {
            ClientError::Protocol(format!("authentication reply has no string {ACCESS_TOKEN_FIELD}"))
        })
}
