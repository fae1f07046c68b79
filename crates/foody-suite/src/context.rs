// crates/foody-suite/src/context.rs
// ============================================================================
// Module: Suite Context
// Description: Suite-scoped state threaded through the ordered steps.
// Purpose: Make the data handed from one step to the next explicit.
// Dependencies: foody-client, rand, serde
// ============================================================================

//! ## Overview
//! A [`SuiteContext`] is created once per run after authentication and passed
//! by `&mut` into every step. It owns the authenticated client and the only
//! cross-step value: the id of the most recently created food.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use foody_client::FoodId;
use foody_client::FoodyClient;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

// ============================================================================
// SECTION: State Keys
// ============================================================================

/// Named pieces of context state that steps provide or require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKey {
    /// Id of the food created by an earlier step.
    LastCreatedFoodId,
}

impl StateKey {
    /// Returns a stable label for the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastCreatedFoodId => "last_created_food_id",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Suite-scoped context shared by the ordered steps.
pub struct SuiteContext {
    /// Authenticated API client.
    client: FoodyClient,
    /// Id recorded by the create step.
    last_created_food_id: Option<FoodId>,
    /// Source of generated names.
    rng: StdRng,
}

impl SuiteContext {
    /// Creates a context with an entropy-seeded name generator.
    #[must_use]
    pub fn new(client: FoodyClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a context with a fixed seed for reproducible names.
    #[must_use]
    pub fn with_seed(client: FoodyClient, seed: u64) -> Self {
        Self::with_rng(client, StdRng::seed_from_u64(seed))
    }

    /// Assembles a context.
    const fn with_rng(client: FoodyClient, rng: StdRng) -> Self {
        Self {
            client,
            last_created_food_id: None,
            rng,
        }
    }

    /// Returns the authenticated client.
    #[must_use]
    pub const fn client(&self) -> &FoodyClient {
        &self.client
    }

    /// Returns the id recorded by the create step, if any.
    #[must_use]
    pub const fn last_created_food_id(&self) -> Option<&FoodId> {
        self.last_created_food_id.as_ref()
    }

    /// Records the id of a newly created food.
    pub fn record_created_food(&mut self, id: FoodId) {
        tracing::info!(food_id = %id, "recorded created food id");
        self.last_created_food_id = Some(id);
    }

    /// Returns true when the named state is currently available.
    #[must_use]
    pub const fn has(&self, key: StateKey) -> bool {
        match key {
            StateKey::LastCreatedFoodId => self.last_created_food_id.is_some(),
        }
    }

    /// Returns the client and the name generator for one step.
    pub(crate) fn parts(&mut self) -> (&FoodyClient, &mut StdRng) {
        (&self.client, &mut self.rng)
    }

    /// Ends the context and hands back the client for teardown.
    #[must_use]
    pub fn into_client(self) -> FoodyClient {
        self.client
    }
}
