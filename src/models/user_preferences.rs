use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A user's star rating of one recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    pub recipe_id: String,
    /// 1 through 5
    pub rating: u8,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

/// Per-user favorites, ratings and dietary selections
///
/// Update operations return a new value instead of mutating in place; the
/// caller decides when to persist it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub ratings: Vec<UserRating>,
}

impl UserPreferences {
    /// Creates empty user preferences
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|id| id == recipe_id)
    }

    /// The live rating for a recipe, if any
    pub fn rating_for(&self, recipe_id: &str) -> Option<u8> {
        self.ratings
            .iter()
            .find(|r| r.recipe_id == recipe_id)
            .map(|r| r.rating)
    }

    /// Adds the recipe to favorites, or removes it if already there
    pub fn toggle_favorite(&self, recipe_id: &str) -> Self {
        let mut next = self.clone();
        if next.is_favorite(recipe_id) {
            next.favorites.retain(|id| id != recipe_id);
        } else {
            next.favorites.push(recipe_id.to_string());
        }
        next
    }

    /// Records a rating, replacing any earlier rating of the same recipe
    pub fn rate(&self, recipe_id: &str, rating: u8, timestamp: i64) -> AppResult<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }

        let mut next = self.clone();
        next.ratings.retain(|r| r.recipe_id != recipe_id);
        next.ratings.push(UserRating {
            recipe_id: recipe_id.to_string(),
            rating,
            timestamp,
        });
        Ok(next)
    }

    /// Repairs ratings read from storage, returning the number of entries dropped
    ///
    /// Ratings outside 1-5 are removed. Of several ratings for one recipe the
    /// newest timestamp wins; on equal timestamps the later entry wins.
    pub fn sanitized(self) -> (Self, usize) {
        let total = self.ratings.len();
        let mut ratings: Vec<UserRating> = Vec::with_capacity(total);
        for rating in self.ratings {
            if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
                continue;
            }
            match ratings.iter_mut().find(|r| r.recipe_id == rating.recipe_id) {
                Some(existing) if rating.timestamp >= existing.timestamp => *existing = rating,
                Some(_) => {}
                None => ratings.push(rating),
            }
        }

        let dropped = total - ratings.len();
        (Self { ratings, ..self }, dropped)
    }

    /// Replaces the dietary selection, dropping blanks and duplicates
    pub fn with_dietary<I, S>(&self, dietary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for tag in dietary {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        Self {
            dietary: tags,
            ..self.clone()
        }
    }
}
