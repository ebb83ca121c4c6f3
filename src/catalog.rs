use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Recipe, UserPreferences},
};

const BUILTIN_CATALOG: &str = include_str!("../data/recipes.json");

/// The read-only recipe collection, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid recipes and duplicate ids
    pub fn new(recipes: Vec<Recipe>) -> AppResult<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for recipe in &recipes {
            recipe.validate().map_err(AppError::Catalog)?;
            if !seen.insert(recipe.id.as_str()) {
                return Err(AppError::Catalog(format!("duplicate recipe id '{}'", recipe.id)));
            }
        }

        Ok(Self { recipes })
    }

    /// Parses a JSON array of recipes
    pub fn from_json(json: &str) -> AppResult<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// The catalog shipped with the crate
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Reads a catalog file
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), recipes = catalog.len(), "Loaded recipe catalog");
        Ok(catalog)
    }

    /// Loads the configured catalog file, or the built-in catalog when none is configured
    pub async fn load_or_builtin(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => {
                let catalog = Self::builtin()?;
                tracing::info!(recipes = catalog.len(), "Using built-in recipe catalog");
                Ok(catalog)
            }
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Favorited recipes, in catalog order; favorites no longer in the catalog are skipped
    pub fn favorites(&self, preferences: &UserPreferences) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| preferences.is_favorite(&r.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
