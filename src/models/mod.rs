use serde::Serialize;
use std::collections::BTreeMap;

pub mod filters;
pub mod recipe;
pub mod user_preferences;

pub use filters::{RecipeFilters, DEFAULT_MAX_COOKING_TIME};
pub use recipe::{Difficulty, Nutrition, Recipe};
pub use user_preferences::{UserPreferences, UserRating, MAX_RATING, MIN_RATING};

// ============================================================================
// Derived result types
// ============================================================================

/// A filtered recipe together with the user ingredients it matched
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    pub matching_ingredients: Vec<String>,
    /// "N matching ingredient(s)", absent when nothing matched
    pub badge: Option<String>,
    pub is_favorite: bool,
    pub user_rating: Option<u8>,
}

/// A recipe that can be made once a few ingredients are substituted
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionCandidate<'a> {
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    pub missing_ingredients: Vec<String>,
    /// Missing ingredient -> known substitutes; ingredients with no known
    /// substitutes are left out
    pub substitution_options: BTreeMap<String, Vec<String>>,
    pub can_make_with_substitutions: bool,
}
