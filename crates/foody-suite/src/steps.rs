// crates/foody-suite/src/steps.rs
// ============================================================================
// Module: Suite Steps
// Description: The seven ordered cases of the Food API suite.
// Purpose: Issue each case's request and validate its reply.
// Dependencies: foody-client, tracing
// ============================================================================

//! ## Overview
//! Each [`SuiteStep`] declares the context state it requires and provides so
//! the pipeline can reject a misordered run before any request is sent.
//! Steps never abort the run: request errors and mismatches are collected as
//! failures in the step's [`StepOutcome`].
//!
//! When a step needs the created food id and none was recorded, it still
//! issues its request against an empty id and notes the missing state, so the
//! failure shows up as a secondary symptom of the failed create step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use foody_client::ApiReply;
use foody_client::ApiResponse;
use foody_client::ClientError;
use foody_client::FoodId;
use foody_client::StatusCode;

use crate::context::StateKey;
use crate::context::SuiteContext;
use crate::data;
use crate::validate::AssertionFailure;
use crate::validate::Checks;
use crate::validate::expect_body_contains;
use crate::validate::expect_food_id;
use crate::validate::expect_json;
use crate::validate::expect_msg;
use crate::validate::expect_non_empty_array;
use crate::validate::expect_status;

// ============================================================================
// SECTION: Expected Messages
// ============================================================================

/// Message returned after a successful edit.
pub const MSG_EDITED: &str = "Successfully edited";
/// Message returned after a successful delete.
pub const MSG_DELETED: &str = "Deleted successfully!";
/// Message returned when editing an unknown food.
pub const MSG_NO_FOOD: &str = "No food revues...";
/// Message returned when deleting an unknown food.
pub const MSG_DELETE_FAILED: &str = "Unable to delete this food revue!";
/// Validation text for a missing name.
pub const NAME_REQUIRED: &str = "The Name field is required.";
/// Validation text for a missing description.
pub const DESCRIPTION_REQUIRED: &str = "The Description field is required.";

/// Note attached when a step runs without the id it depends on.
pub const MISSING_FOOD_ID_NOTE: &str = "no food id recorded by an earlier step";

/// Nothing required or provided.
const NO_STATE: &[StateKey] = &[];
/// The created food id.
const FOOD_ID_STATE: &[StateKey] = &[StateKey::LastCreatedFoodId];

// ============================================================================
// SECTION: Types
// ============================================================================

/// One case of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteStep {
    /// Create a food with valid fields; expect 201 and a food id.
    CreateFood,
    /// Rename the created food; expect 200 "Successfully edited".
    EditFoodTitle,
    /// List all foods; expect 200 and a non-empty array.
    ListFoods,
    /// Delete the created food; expect 200 "Deleted successfully!".
    DeleteFood,
    /// Create with empty required fields; expect 400 with both messages.
    CreateFoodMissingFields,
    /// Edit the sentinel id; expect 404 "No food revues...".
    EditNonExistingFood,
    /// Delete the sentinel id; expect 400 "Unable to delete this food revue!".
    DeleteNonExistingFood,
}

/// Result of running one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Assertion failures; empty when the step passed.
    pub failures: Vec<AssertionFailure>,
    /// Informational notes.
    pub notes: Vec<String>,
}

impl StepOutcome {
    /// Returns true when no check failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl SuiteStep {
    /// The seven cases in their required order.
    pub const STANDARD: [Self; 7] = [
        Self::CreateFood,
        Self::EditFoodTitle,
        Self::ListFoods,
        Self::DeleteFood,
        Self::CreateFoodMissingFields,
        Self::EditNonExistingFood,
        Self::DeleteNonExistingFood,
    ];

    /// Returns a stable name for the step.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateFood => "create_food",
            Self::EditFoodTitle => "edit_food_title",
            Self::ListFoods => "list_foods",
            Self::DeleteFood => "delete_food",
            Self::CreateFoodMissingFields => "create_food_missing_fields",
            Self::EditNonExistingFood => "edit_non_existing_food",
            Self::DeleteNonExistingFood => "delete_non_existing_food",
        }
    }

    /// Returns the context state this step reads.
    #[must_use]
    pub const fn requires(self) -> &'static [StateKey] {
        match self {
            Self::EditFoodTitle | Self::DeleteFood => FOOD_ID_STATE,
            _ => NO_STATE,
        }
    }

    /// Returns the context state this step writes.
    #[must_use]
    pub const fn provides(self) -> &'static [StateKey] {
        match self {
            Self::CreateFood => FOOD_ID_STATE,
            _ => NO_STATE,
        }
    }

    /// Runs the step against the context.
    pub async fn run(self, ctx: &mut SuiteContext) -> StepOutcome {
        let mut checks = Checks::default();
        let mut notes = Vec::new();
        match self {
            Self::CreateFood => create_food(ctx, &mut checks, &mut notes).await,
            Self::EditFoodTitle => {
                let id = stored_food_id(ctx, &mut notes);
                edit_food(ctx, &id, StatusCode::OK, MSG_EDITED, &mut checks).await;
            }
            Self::ListFoods => list_foods(ctx, &mut checks, &mut notes).await,
            Self::DeleteFood => {
                let id = stored_food_id(ctx, &mut notes);
                delete_food(ctx, &id, StatusCode::OK, MSG_DELETED, &mut checks).await;
            }
            Self::CreateFoodMissingFields => create_food_missing_fields(ctx, &mut checks).await,
            Self::EditNonExistingFood => {
                let id = FoodId::non_existing();
                edit_food(ctx, &id, StatusCode::NOT_FOUND, MSG_NO_FOOD, &mut checks).await;
            }
            Self::DeleteNonExistingFood => {
                let id = FoodId::non_existing();
                delete_food(ctx, &id, StatusCode::BAD_REQUEST, MSG_DELETE_FAILED, &mut checks)
                    .await;
            }
        }
        StepOutcome {
            failures: checks.into_failures(),
            notes,
        }
    }
}

// ============================================================================
// SECTION: Step Bodies
// ============================================================================

/// Creates a valid food and records its id on success.
async fn create_food(ctx: &mut SuiteContext, checks: &mut Checks, notes: &mut Vec<String>) {
    let (client, rng) = ctx.parts();
    let record = data::new_food(rng);
    notes.push(format!("food name {}", record.name));
    let Some(reply) = sent(checks, client.create_food(&record).await) else {
        return;
    };
    let created = checks.record(expect_status(&reply, StatusCode::CREATED)).is_some();
    let Some(response) = checks.record(expect_json::<ApiResponse>(&reply)) else {
        return;
    };
    let id = checks.record(expect_food_id(&response));
    if let (true, Some(id)) = (created, id) {
        notes.push(format!("food id {id}"));
        ctx.record_created_food(id);
    }
}

/// Renames `id` and checks the status and message.
async fn edit_food(
    ctx: &mut SuiteContext,
    id: &FoodId,
    status: StatusCode,
    msg: &str,
    checks: &mut Checks,
) {
    let (client, rng) = ctx.parts();
    let changes = data::rename_patch(rng);
    let reply = sent(checks, client.edit_food(id, &changes).await);
    expect_reply_msg(checks, reply.as_ref(), status, msg);
}

/// Lists every food and checks the array is non-empty.
async fn list_foods(ctx: &SuiteContext, checks: &mut Checks, notes: &mut Vec<String>) {
    let Some(reply) = sent(checks, ctx.client().list_foods().await) else {
        return;
    };
    checks.record(expect_status(&reply, StatusCode::OK));
    if let Some(count) = checks.record(expect_non_empty_array(&reply)) {
        notes.push(format!("{count} foods listed"));
    }
}

/// Deletes `id` and checks the status and message.
async fn delete_food(
    ctx: &SuiteContext,
    id: &FoodId,
    status: StatusCode,
    msg: &str,
    checks: &mut Checks,
) {
    let reply = sent(checks, ctx.client().delete_food(id).await);
    expect_reply_msg(checks, reply.as_ref(), status, msg);
}

/// Creates a food with blank required fields and checks both validation texts.
async fn create_food_missing_fields(ctx: &SuiteContext, checks: &mut Checks) {
    let record = data::food_missing_required_fields();
    let Some(reply) = sent(checks, ctx.client().create_food(&record).await) else {
        return;
    };
    checks.record(expect_status(&reply, StatusCode::BAD_REQUEST));
    checks.record(expect_body_contains(&reply, NAME_REQUIRED));
    checks.record(expect_body_contains(&reply, DESCRIPTION_REQUIRED));
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Records a request error as a failure and yields the reply otherwise.
fn sent(checks: &mut Checks, result: Result<ApiReply, ClientError>) -> Option<ApiReply> {
    checks.record(result.map_err(|err| AssertionFailure::new(format!("request failed: {err}"))))
}

/// Checks a reply's status and `msg` field.
fn expect_reply_msg(checks: &mut Checks, reply: Option<&ApiReply>, status: StatusCode, msg: &str) {
    let Some(reply) = reply else {
        return;
    };
    checks.record(expect_status(reply, status));
    if let Some(response) = checks.record(expect_json::<ApiResponse>(reply)) {
        checks.record(expect_msg(&response, msg));
    }
}

/// Returns the recorded food id, or an empty id with a note when none exists.
fn stored_food_id(ctx: &SuiteContext, notes: &mut Vec<String>) -> FoodId {
    ctx.last_created_food_id().cloned().unwrap_or_else(|| {
        tracing::warn!(step_state = %StateKey::LastCreatedFoodId, "{MISSING_FOOD_ID_NOTE}");
        notes.push(MISSING_FOOD_ID_NOTE.to_string());
        FoodId::new("")
    })
}
