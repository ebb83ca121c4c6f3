use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Difficulty;

pub const DEFAULT_MAX_COOKING_TIME: u32 = 120;

/// Predicate filters applied after the ingredient filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilters {
    /// Allowed difficulties; empty means any
    #[serde(default)]
    pub difficulty: BTreeSet<Difficulty>,
    /// Minutes; always applied
    #[serde(default = "default_max_cooking_time")]
    pub max_cooking_time: u32,
    /// Every tag here must be on the recipe
    #[serde(default)]
    pub dietary: BTreeSet<String>,
}

fn default_max_cooking_time() -> u32 {
    DEFAULT_MAX_COOKING_TIME
}

impl Default for RecipeFilters {
    fn default() -> Self {
        Self {
            difficulty: BTreeSet::new(),
            max_cooking_time: DEFAULT_MAX_COOKING_TIME,
            dietary: BTreeSet::new(),
        }
    }
}

impl RecipeFilters {
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        if !self.difficulty.remove(&difficulty) {
            self.difficulty.insert(difficulty);
        }
    }

    pub fn toggle_dietary(&mut self, tag: &str) {
        if !self.dietary.remove(tag) {
            self.dietary.insert(tag.to_string());
        }
    }
}
