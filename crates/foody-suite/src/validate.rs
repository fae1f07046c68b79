// crates/foody-suite/src/validate.rs
// ============================================================================
// Module: Response Validators
// Description: Assertions over status codes and reply bodies.
// Purpose: Compare API replies against expected literals without panicking.
// Dependencies: foody-client, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Validators return [`AssertionFailure`] instead of panicking so a step can
//! run every check and report all mismatches. Comparisons are exact except
//! [`expect_body_contains`], which is a substring check on the raw body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use foody_client::ApiReply;
use foody_client::ApiResponse;
use foody_client::FoodId;
use foody_client::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A single failed expectation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// Human-readable mismatch description.
    pub message: String,
}

impl AssertionFailure {
    /// Builds a failure from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collects the failures of one step while letting every check run.
#[derive(Debug, Default)]
pub struct Checks {
    /// Failures in the order they were observed.
    failures: Vec<AssertionFailure>,
}

impl Checks {
    /// Records a check result and passes the success value through.
    pub fn record<T>(&mut self, result: Result<T, AssertionFailure>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                tracing::warn!(failure = %failure, "assertion failed");
                self.failures.push(failure);
                None
            }
        }
    }

    /// Records a failure directly.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.record::<()>(Err(AssertionFailure::new(message)));
    }

    /// Returns the collected failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<AssertionFailure> {
        self.failures
    }
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Checks the reply status code.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the status differs.
pub fn expect_status(reply: &ApiReply, expected: StatusCode) -> Result<(), AssertionFailure> {
    if reply.status == expected {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "expected status {expected}, got {}; body: {}",
        reply.status, reply.body
    )))
}

/// Decodes the reply body as JSON.
///
/// # Errors
///
/// Returns [`AssertionFailure`] with the decode error when the body does not
/// match `T`.
pub fn expect_json<T: DeserializeOwned>(reply: &ApiReply) -> Result<T, AssertionFailure> {
    reply.json().map_err(|err| AssertionFailure::new(err.to_string()))
}

/// Checks that the reply message equals `expected`.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when `msg` is missing or differs.
pub fn expect_msg(response: &ApiResponse, expected: &str) -> Result<(), AssertionFailure> {
    match response.msg.as_deref() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => {
            Err(AssertionFailure::new(format!("expected msg \"{expected}\", got \"{actual}\"")))
        }
        None => Err(AssertionFailure::new(format!("expected msg \"{expected}\", got none"))),
    }
}

/// Checks that the reply carries a usable food id.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when `foodId` is missing, blank, or the
/// not-found sentinel.
pub fn expect_food_id(response: &ApiResponse) -> Result<FoodId, AssertionFailure> {
    let Some(raw) = response.food_id.as_deref() else {
        return Err(AssertionFailure::new("response does not contain a 'foodId' property"));
    };
    let id = FoodId::new(raw);
    if id.is_blank() {
        return Err(AssertionFailure::new("response 'foodId' is empty"));
    }
    if id.is_sentinel() {
        return Err(AssertionFailure::new(format!(
            "response 'foodId' equals the non-existing sentinel {}",
            FoodId::NON_EXISTING
        )));
    }
    Ok(id)
}

/// Checks that the raw body contains `needle`.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the substring is absent.
pub fn expect_body_contains(reply: &ApiReply, needle: &str) -> Result<(), AssertionFailure> {
    if reply.body.contains(needle) {
        return Ok(());
    }
    Err(AssertionFailure::new(format!("expected body to contain \"{needle}\"; body: {}", reply.body)))
}

/// Checks that the body is a JSON array with at least one element.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the body is not an array or is empty.
pub fn expect_non_empty_array(reply: &ApiReply) -> Result<usize, AssertionFailure> {
    let value: Value = expect_json(reply)?;
    match value {
        Value::Array(items) if !items.is_empty() => Ok(items.len()),
        Value::Array(_) => Err(AssertionFailure::new("expected a non-empty array, got []")),
        other => Err(AssertionFailure::new(format!("expected a json array, got {other}"))),
    }
}
