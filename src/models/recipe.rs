use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How demanding a recipe is to prepare
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Nutrition facts for the recipe's baseline serving count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    pub calories: f64,
    /// Grams
    pub protein: f64,
    /// Grams
    pub carbs: f64,
    /// Grams
    pub fat: f64,
}

impl Nutrition {
    /// Scales the baseline values to a different number of servings
    ///
    /// Requested servings below 1 are treated as 1, matching the serving
    /// adjuster which never goes lower.
    pub fn scaled(&self, baseline_servings: u32, servings: u32) -> Nutrition {
        let baseline = baseline_servings.max(1) as f64;
        let multiplier = servings.max(1) as f64 / baseline;
        Nutrition {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    fn is_non_negative(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// A catalog recipe. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cuisine: String,
    pub difficulty: Difficulty,
    /// Minutes
    pub cooking_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub dietary: Vec<String>,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Checks the invariants every catalog recipe must hold
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err(format!("recipe '{}' has an empty id", self.name));
        }
        if self.ingredients.is_empty() {
            return Err(format!("recipe '{}' has no ingredients", self.id));
        }
        if self.cooking_time == 0 {
            return Err(format!("recipe '{}' has a zero cooking time", self.id));
        }
        if self.servings == 0 {
            return Err(format!("recipe '{}' has zero servings", self.id));
        }
        if !self.nutrition.is_non_negative() {
            return Err(format!("recipe '{}' has negative nutrition values", self.id));
        }
        Ok(())
    }

    /// Nutrition for the requested number of servings
    pub fn nutrition_for(&self, servings: u32) -> Nutrition {
        self.nutrition.scaled(self.servings, servings)
    }

    pub fn has_dietary(&self, tag: &str) -> bool {
        self.dietary.iter().any(|d| d == tag)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal recipe builder for tests across the crate
    pub fn recipe(id: &str, ingredients: &[&str], difficulty: Difficulty, cooking_time: u32) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec!["Cook it".to_string()],
            cuisine: "Test".to_string(),
            difficulty,
            cooking_time,
            servings: 2,
            dietary: Vec::new(),
            nutrition: Nutrition {
                calories: 400.0,
                protein: 20.0,
                carbs: 40.0,
                fat: 10.0,
            },
            image: None,
            tags: Vec::new(),
        }
    }

    pub fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }
}
