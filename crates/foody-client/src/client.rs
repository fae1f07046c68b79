// crates/foody-client/src/client.rs
// ============================================================================
// Module: Foody HTTP Client
// Description: Bearer-authenticated wrapper over the Food API endpoints.
// Purpose: Issue GET/POST/PATCH/DELETE calls for a suite run with transcripts.
// Dependencies: reqwest, serde, serde_json, percent-encoding, url
// ============================================================================

//! ## Overview
//! [`FoodyClient`] owns the base URL and the access token for the lifetime of
//! a suite run and attaches the token to every request. Replies are returned
//! as raw [`ApiReply`] values whatever their status; asserting on them is the
//! caller's job. Every exchange is appended to an in-memory transcript.
//! Security posture: reply bodies are untrusted; the token is never recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::auth::AccessToken;
use crate::auth::Credentials;
use crate::auth::acquire_token;
use crate::error::ClientError;
use crate::models::FoodId;
use crate::models::FoodRecord;
use crate::models::PatchOperation;

// ============================================================================
// SECTION: Endpoints
// ============================================================================

/// Create endpoint path.
pub const CREATE_FOOD_PATH: &str = "/api/Food/Create";
/// Edit endpoint prefix; the food id is appended as a path segment.
pub const EDIT_FOOD_PATH: &str = "/api/Food/Edit";
/// List endpoint path.
pub const LIST_FOODS_PATH: &str = "/api/Food/All";
/// Delete endpoint prefix; the food id is appended as a path segment.
pub const DELETE_FOOD_PATH: &str = "/api/Food/Delete";

/// Characters escaped when a food id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'/').add(b'?').add(b'<').add(b'>');

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Transport settings shared by the token acquirer and the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Absolute base URL of the API.
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    /// Creates settings with the transport default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets an explicit request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the underlying HTTP client.
    fn build_http(&self) -> Result<Client, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))
    }
}

// ============================================================================
// SECTION: Replies
// ============================================================================

/// Raw reply of a single API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw reply body text.
    pub body: String,
}

impl ApiReply {
    /// Builds a reply from a status and body text.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Protocol`] with the decode error and raw body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| {
            ClientError::Protocol(format!("reply body is not the expected json ({err}): {}", self.body))
        })
    }
}

/// Recorded API exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// JSON request body, or null when none was sent.
    pub request: Value,
    /// HTTP status code of the reply.
    pub status: u16,
    /// Raw reply body.
    pub response: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Authenticated Food API client.
pub struct FoodyClient {
    /// Absolute base URL.
    base_url: String,
    /// Underlying HTTP client.
    http: Client,
    /// Bearer token attached to every request.
    token: AccessToken,
    /// Exchanges recorded so far.
    transcript: Mutex<Vec<TranscriptEntry>>,
}

impl FoodyClient {
    /// Authenticates and returns a client carrying the acquired token.
    ///
    /// # Errors
    ///
    /// Returns the token acquirer's error unchanged; callers treat it as fatal.
    pub async fn connect(
        settings: &ClientSettings,
        credentials: &Credentials,
    ) -> Result<Self, ClientError> {
        let http = settings.build_http()?;
        let token = acquire_token(&http, &settings.base_url, credentials).await?;
        tracing::info!(base_url = %settings.base_url, "authenticated against foody api");
        Ok(Self::from_parts(settings.base_url.clone(), http, token))
    }

    /// Creates a client from a token obtained elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn with_token(settings: &ClientSettings, token: AccessToken) -> Result<Self, ClientError> {
        let http = settings.build_http()?;
        Ok(Self::from_parts(settings.base_url.clone(), http, token))
    }

    /// Assembles a client from its parts.
    fn from_parts(base_url: String, http: Client, token: AccessToken) -> Self {
        Self {
            base_url,
            http,
            token,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Releases the client and returns the final transcript.
    #[must_use]
    pub fn close(self) -> Vec<TranscriptEntry> {
        self.transcript.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Generic verbs
    // ------------------------------------------------------------------------

    /// Issues an authenticated GET.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failure.
    pub async fn get(&self, path: &str) -> Result<ApiReply, ClientError> {
        self.send(Method::GET, path, None).await
    }

    /// Issues an authenticated POST with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on serialization, URL, or transport failure.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiReply, ClientError> {
        let body = to_json(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    /// Issues an authenticated PATCH with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on serialization, URL, or transport failure.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiReply, ClientError> {
        let body = to_json(body)?;
        self.send(Method::PATCH, path, Some(body)).await
    }

    /// Issues an authenticated DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failure.
    pub async fn delete(&self, path: &str) -> Result<ApiReply, ClientError> {
        self.send(Method::DELETE, path, None).await
    }

    // ------------------------------------------------------------------------
    // Food endpoints
    // ------------------------------------------------------------------------

    /// `POST /api/Food/Create`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn create_food(&self, record: &FoodRecord) -> Result<ApiReply, ClientError> {
        self.post(CREATE_FOOD_PATH, record).await
    }

    /// `PATCH /api/Food/Edit/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn edit_food(
        &self,
        id: &FoodId,
        changes: &[PatchOperation],
    ) -> Result<ApiReply, ClientError> {
        self.patch(&food_path(EDIT_FOOD_PATH, id), changes).await
    }

    /// `GET /api/Food/All`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn list_foods(&self) -> Result<ApiReply, ClientError> {
        self.get(LIST_FOODS_PATH).await
    }

    /// `DELETE /api/Food/Delete/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub async fn delete_food(&self, id: &FoodId) -> Result<ApiReply, ClientError> {
        self.delete(&food_path(DELETE_FOOD_PATH, id)).await
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    /// Sends one request and records the exchange.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiReply, ClientError> {
        let url = join_url(&self.base_url, path)?;
        let mut request = self.http.request(method.clone(), url).bearer_auth(self.token.expose());
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(format!("{method} {path} failed: {err}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ClientError::Transport(format!("{method} {path} reply unreadable: {err}")))?;
        tracing::debug!(method = %method, path, status = status.as_u16(), "foody exchange");
        self.record(&method, path, body.unwrap_or(Value::Null), status, &text);
        Ok(ApiReply::new(status, text))
    }

    /// Appends an exchange to the transcript.
    fn record(&self, method: &Method, path: &str, request: Value, status: StatusCode, response: &str) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.as_str().to_string(),
            path: path.to_string(),
            request,
            status: status.as_u16(),
            response: response.to_string(),
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a request body to JSON.
fn to_json<T: Serialize + ?Sized>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|err| ClientError::Json(err.to_string()))
}

/// Builds `{prefix}/{id}` with the id escaped as one path segment.
///
/// A blank id yields a trailing slash, which the API answers like any other
/// unknown id.
#[must_use]
pub fn food_path(prefix: &str, id: &FoodId) -> String {
    format!("{prefix}/{}", utf8_percent_encode(id.as_str(), PATH_SEGMENT))
}

/// Joins a base URL and a relative path without doubling slashes.
///
/// # Errors
///
/// Returns [`ClientError::Config`] when the result is not an absolute
/// http(s) URL.
pub fn join_url(base_url: &str, path: &str) -> Result<Url, ClientError> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    let url = Url::parse(&joined)
        .map_err(|err| ClientError::Config(format!("invalid url {joined}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::Config(format!("unsupported url scheme {other}"))),
    }
}
