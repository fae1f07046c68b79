// crates/foody-client/src/models.rs
// ============================================================================
// Module: Foody Wire Models
// Description: Request and reply payloads for the Food API.
// Purpose: Give each JSON body exchanged with the API a typed shape.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Typed request and reply bodies for the Food API. Reply fields are optional
//! because error replies omit them; unknown reply fields are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Server-issued food identifier.
///
/// # Invariants
/// - The server owns the format; construction never rejects a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(String);

impl FoodId {
    /// Identifier that never names an existing food.
    pub const NON_EXISTING: &'static str = "-1";

    /// Wraps a server-issued identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the sentinel identifier used to probe not-found paths.
    #[must_use]
    pub fn non_existing() -> Self {
        Self::new(Self::NON_EXISTING)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns true when the identifier equals the not-found sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::NON_EXISTING
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Request Bodies
// ============================================================================

/// Body of `POST /api/Food/Create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Display name of the food.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Optional image URL; `None` serializes as JSON null.
    pub url: Option<String>,
}

impl FoodRecord {
    /// Builds a record with an empty image URL.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: Some(String::new()),
        }
    }
}

/// Patch operation verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Replace the value at `path`.
    Replace,
    /// Add a value at `path`.
    Add,
    /// Remove the value at `path`.
    Remove,
}

/// One entry of a JSON-patch-style partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// JSON pointer of the field to change.
    pub path: String,
    /// Operation to apply.
    pub op: PatchOp,
    /// New value for the field.
    pub value: String,
}

impl PatchOperation {
    /// Builds a `replace` operation.
    #[must_use]
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            op: PatchOp::Replace,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Reply Bodies
// ============================================================================

/// Reply body shared by create, edit, and delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Human-readable outcome message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Identifier of the created food.
    #[serde(default, rename = "foodId")]
    pub food_id: Option<String>,
}
