// crates/foody-client/src/error.rs
// ============================================================================
// Module: Foody Client Errors
// Description: Error type shared by the token acquirer and the API client.
// Purpose: Separate transport and protocol failures from API replies.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Non-2xx replies from Food endpoints are not errors at this layer; they are
//! returned as [`crate::ApiReply`] values for the caller to assert on. Only the
//! authentication exchange turns a non-2xx status into an error.

use thiserror::Error;

/// Client errors.
///
/// # Invariants
/// - String payloads may include untrusted server text.
/// - Payloads never include the password or the access token.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (invalid base URL or path).
    #[error("foody client config error: {0}")]
    Config(String),
    /// Transport failure before a reply was received.
    #[error("foody transport error: {0}")]
    Transport(String),
    /// Authentication endpoint returned a non-2xx status.
    #[error("failed to authenticate. status code: {status}, content: {body}")]
    Authentication {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw reply body.
        body: String,
    },
    /// Reply did not have the expected shape.
    #[error("foody protocol error: {0}")]
    Protocol(String),
    /// JSON serialization error.
    #[error("foody json error: {0}")]
    Json(String),
}
