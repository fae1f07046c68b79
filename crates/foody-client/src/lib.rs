// crates/foody-client/src/lib.rs
// ============================================================================
// Module: Foody Client
// Description: Token acquirer and bearer-authenticated client for the Food API.
// Purpose: Provide the HTTP plumbing the end-to-end suite runs on.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Foody Client authenticates once against the Food API and then issues
//! bearer-authenticated calls for the lifetime of a suite run. Replies are
//! returned raw so callers can assert on both success and error paths.
//! Security posture: the API is untrusted; credentials and tokens are never
//! logged or recorded in transcripts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod client;
pub mod error;
pub mod models;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auth::AccessToken;
pub use auth::Credentials;
pub use auth::acquire_token;
pub use client::ApiReply;
pub use client::ClientSettings;
pub use client::FoodyClient;
pub use client::TranscriptEntry;
pub use error::ClientError;
pub use models::ApiResponse;
pub use models::FoodId;
pub use models::FoodRecord;
pub use models::PatchOp;
pub use models::PatchOperation;
pub use reqwest::StatusCode;
