// crates/foody-suite/src/data.rs
// ============================================================================
// Module: Test Data
// Description: Generated payloads for the suite steps.
// Purpose: Produce unique food names per run so reruns do not collide.
// Dependencies: foody-client, rand
// ============================================================================

//! Generated food payloads. Names carry random alphanumeric suffixes.

use foody_client::FoodRecord;
use foody_client::PatchOperation;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Random suffix length for food and edited names.
const NAME_SUFFIX_LEN: usize = 6;
/// Random suffix length for descriptions.
const DESCRIPTION_SUFFIX_LEN: usize = 16;
/// JSON pointer of the food name.
pub const NAME_PATH: &str = "/name";

/// Returns `len` random ASCII letters and digits.
pub fn random_alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    std::iter::repeat_with(|| char::from(rng.sample(Alphanumeric))).take(len).collect()
}

/// Builds a valid create payload with an empty image URL.
pub fn new_food<R: Rng + ?Sized>(rng: &mut R) -> FoodRecord {
    FoodRecord::new(
        format!("Food_{}", random_alphanumeric(rng, NAME_SUFFIX_LEN)),
        format!("Description {}", random_alphanumeric(rng, DESCRIPTION_SUFFIX_LEN)),
    )
}

/// Builds a create payload with every required field empty.
#[must_use]
pub fn food_missing_required_fields() -> FoodRecord {
    FoodRecord::new("", "")
}

/// Builds the single-operation patch that renames a food.
pub fn rename_patch<R: Rng + ?Sized>(rng: &mut R) -> Vec<PatchOperation> {
    vec![PatchOperation::replace(
        NAME_PATH,
        format!("Updated_food_{}", random_alphanumeric(rng, NAME_SUFFIX_LEN)),
    )]
}
