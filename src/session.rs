use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    catalog::Catalog,
    config::Config,
    error::{AppError, AppResult},
    models::{Difficulty, Recipe, RecipeFilters, RecipeMatch, SubstitutionCandidate, UserPreferences},
    services::{
        detection::{self, DetectionError, DetectionTracker, IngredientDetector, ImageInput},
        filtering, matcher, recommendations,
        substitutions::SubstitutionTable,
        suggestions,
    },
    store::{self, PreferenceStore},
};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub detection_timeout: Duration,
    pub recommendation_limit: usize,
    pub page_recommendation_limit: usize,
    pub similar_limit: usize,
    pub max_missing_ingredients: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            detection_timeout: detection::DEFAULT_DETECTION_TIMEOUT,
            recommendation_limit: recommendations::DEFAULT_RECOMMENDATION_LIMIT,
            page_recommendation_limit: recommendations::DEFAULT_PAGE_RECOMMENDATION_LIMIT,
            similar_limit: recommendations::DEFAULT_SIMILAR_LIMIT,
            max_missing_ingredients: recommendations::DEFAULT_MAX_MISSING,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            detection_timeout: Duration::from_secs(config.detector_timeout_secs),
            recommendation_limit: config.recommendation_limit,
            page_recommendation_limit: config.page_recommendation_limit,
            similar_limit: config.similar_limit,
            max_missing_ingredients: config.max_missing_ingredients,
        }
    }
}

/// Mutable per-session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub preferences: UserPreferences,
    pub selected_ingredients: Vec<String>,
    pub filters: RecipeFilters,
}

/// What happened to a detection request
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionReport {
    /// Detection succeeded; `added` are the detected ingredients that were not already selected
    Added { detected: Vec<String>, added: Vec<String> },
    /// Detection failed; selected ingredients are unchanged
    Failed { error: DetectionError, message: String },
    /// A newer detection request started before this one finished; its result was dropped
    Superseded,
}

/// One user's recipe browsing session
///
/// Holds the selected ingredients, filters and preferences behind a single
/// lock. Preference mutations hold the write lock across update and save so
/// concurrent callers cannot lose each other's updates. Queries take a
/// snapshot and compute without holding the lock.
pub struct RecipeSession {
    catalog: Arc<Catalog>,
    store: Arc<dyn PreferenceStore>,
    substitutions: Arc<SubstitutionTable>,
    settings: SessionSettings,
    state: RwLock<SessionState>,
    detections: DetectionTracker,
}

impl RecipeSession {
    /// Starts a session, loading saved preferences from the store
    pub async fn open(catalog: Arc<Catalog>, store: Arc<dyn PreferenceStore>) -> Self {
        let preferences = store::load_preferences(store.as_ref()).await;

        tracing::info!(
            recipes = catalog.len(),
            favorites = preferences.favorites.len(),
            ratings = preferences.ratings.len(),
            store = store.name(),
            "Recipe session opened"
        );

        Self {
            catalog,
            store,
            substitutions: SubstitutionTable::shared(),
            settings: SessionSettings::default(),
            state: RwLock::new(SessionState {
                preferences,
                ..SessionState::default()
            }),
            detections: DetectionTracker::new(),
        }
    }

    /// Starts a session from configuration: catalog, preference store and limits
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = Catalog::load_or_builtin(config.catalog_path.as_deref()).await?;
        let store = store::open_store(config)?;
        Ok(Self::open(Arc::new(catalog), store)
            .await
            .with_settings(SessionSettings::from(config)))
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_substitutions(mut self, substitutions: Arc<SubstitutionTable>) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn preferences(&self) -> UserPreferences {
        self.state.read().await.preferences.clone()
    }

    pub async fn selected_ingredients(&self) -> Vec<String> {
        self.state.read().await.selected_ingredients.clone()
    }

    pub async fn filters(&self) -> RecipeFilters {
        self.state.read().await.filters.clone()
    }

    // ------------------------------------------------------------------------
    // Ingredient selection
    // ------------------------------------------------------------------------

    /// Adds a typed ingredient; returns false if blank or already selected
    pub async fn add_ingredient(&self, ingredient: &str) -> bool {
        let Some(ingredient) = suggestions::normalize_ingredient(ingredient) else {
            return false;
        };

        let mut state = self.state.write().await;
        if state.selected_ingredients.contains(&ingredient) {
            return false;
        }
        state.selected_ingredients.push(ingredient);
        true
    }

    pub async fn remove_ingredient(&self, ingredient: &str) {
        self.state
            .write()
            .await
            .selected_ingredients
            .retain(|i| i != ingredient);
    }

    pub async fn clear_ingredients(&self) {
        self.state.write().await.selected_ingredients.clear();
    }

    /// Merges detected ingredients into the selection, returning the ones newly added
    pub async fn merge_detected(&self, detected: &[String]) -> Vec<String> {
        let mut state = self.state.write().await;
        merge_into(&mut state, detected)
    }

    /// Quick-pick suggestions for the current input
    pub async fn suggestions(&self, input: &str) -> Vec<&'static str> {
        let state = self.state.read().await;
        suggestions::suggest_ingredients(input, &state.selected_ingredients)
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    pub async fn set_filters(&self, filters: RecipeFilters) {
        self.state.write().await.filters = filters;
    }

    pub async fn toggle_difficulty(&self, difficulty: Difficulty) {
        self.state.write().await.filters.toggle_difficulty(difficulty);
    }

    pub async fn toggle_dietary_filter(&self, tag: &str) {
        self.state.write().await.filters.toggle_dietary(tag);
    }

    pub async fn set_max_cooking_time(&self, minutes: u32) {
        self.state.write().await.filters.max_cooking_time = minutes;
    }

    // ------------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------------

    /// Favorites or un-favorites a recipe and persists the result
    ///
    /// Only catalog recipes can be added; a stale favorite can always be removed.
    pub async fn toggle_favorite(&self, recipe_id: &str) -> AppResult<UserPreferences> {
        let mut state = self.state.write().await;
        if !state.preferences.is_favorite(recipe_id) {
            self.require_recipe(recipe_id)?;
        }

        let next = state.preferences.toggle_favorite(recipe_id);
        tracing::info!(recipe_id = %recipe_id, favorite = next.is_favorite(recipe_id), "Favorite toggled");
        self.commit(&mut state, next).await
    }

    /// Rates a recipe (1-5), replacing any earlier rating, and persists the result
    pub async fn rate(&self, recipe_id: &str, rating: u8) -> AppResult<UserPreferences> {
        let mut state = self.state.write().await;
        self.require_recipe(recipe_id)?;

        let next = state
            .preferences
            .rate(recipe_id, rating, Utc::now().timestamp_millis())?;
        tracing::info!(recipe_id = %recipe_id, rating, "Recipe rated");
        self.commit(&mut state, next).await
    }

    /// Replaces the user's dietary preferences and persists the result
    pub async fn set_user_dietary(&self, dietary: &[String]) -> AppResult<UserPreferences> {
        let mut state = self.state.write().await;
        let next = state.preferences.with_dietary(dietary);
        self.commit(&mut state, next).await
    }

    fn require_recipe(&self, recipe_id: &str) -> AppResult<&Recipe> {
        self.catalog
            .get(recipe_id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}' not found", recipe_id)))
    }

    /// Applies new preferences and saves them while the write lock is held
    ///
    /// A failed save is logged and the in-memory update is kept, so the user
    /// keeps what they just did; the next successful save persists it.
    async fn commit(&self, state: &mut SessionState, next: UserPreferences) -> AppResult<UserPreferences> {
        state.preferences = next;
        if let Err(e) = store::save_preferences(self.store.as_ref(), &state.preferences).await {
            tracing::warn!(error = %e, store = self.store.name(), "Failed to persist preferences");
        }
        Ok(state.preferences.clone())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Recipes passing the ingredient and predicate filters, with match details
    pub async fn filtered_recipes(&self) -> Vec<RecipeMatch<'_>> {
        let state = self.snapshot().await;
        self.matches_for(&state)
    }

    fn matches_for(&self, state: &SessionState) -> Vec<RecipeMatch<'_>> {
        filtering::filter_recipes(self.catalog.recipes(), &state.selected_ingredients, &state.filters)
            .into_iter()
            .map(|recipe| {
                let matching_ingredients = matcher::matching_ingredients(&state.selected_ingredients, recipe);
                RecipeMatch {
                    recipe,
                    badge: matcher::match_badge(matching_ingredients.len()),
                    matching_ingredients,
                    is_favorite: state.preferences.is_favorite(&recipe.id),
                    user_rating: state.preferences.rating_for(&recipe.id),
                }
            })
            .collect()
    }

    /// Heading for the results list
    pub async fn results_heading(&self) -> String {
        let state = self.snapshot().await;
        let count = self.matches_for(&state).len();
        if state.selected_ingredients.is_empty() {
            format!("All Recipes ({})", count)
        } else {
            format!("Found {} recipes", count)
        }
    }

    /// Recommendations shown alongside ingredient results
    ///
    /// Unlike [`Self::page_recommendations`], the selected ingredients count
    /// toward the coverage term, so the panel follows what the user has on hand.
    pub async fn recommendations(&self) -> Vec<&Recipe> {
        self.recommendations_with_limit(self.settings.recommendation_limit).await
    }

    /// The recommendations page: ratings and dietary preferences only, no ingredients
    pub async fn page_recommendations(&self) -> Vec<&Recipe> {
        let preferences = self.preferences().await;
        recommendations::recommended_recipes::<_, String>(
            self.catalog.recipes(),
            &preferences.ratings,
            &preferences.dietary,
            &[],
            self.settings.page_recommendation_limit,
        )
    }

    /// Personalized recommendations from ratings, dietary preferences and selected ingredients
    pub async fn recommendations_with_limit(&self, limit: usize) -> Vec<&Recipe> {
        let state = self.snapshot().await;
        recommendations::recommended_recipes(
            self.catalog.recipes(),
            &state.preferences.ratings,
            &state.preferences.dietary,
            &state.selected_ingredients,
            limit,
        )
    }

    pub async fn favorite_recipes(&self) -> Vec<&Recipe> {
        let preferences = self.preferences().await;
        self.catalog.favorites(&preferences)
    }

    /// Recipes similar to the given one
    pub fn similar_to(&self, recipe_id: &str) -> AppResult<Vec<&Recipe>> {
        let target = self.require_recipe(recipe_id)?;
        Ok(recommendations::similar_recipes(
            target,
            self.catalog.recipes(),
            self.settings.similar_limit,
        ))
    }

    /// Recipes makeable from the selected ingredients with a few substitutions
    pub async fn substitution_candidates(&self) -> Vec<SubstitutionCandidate<'_>> {
        let selected = self.selected_ingredients().await;
        recommendations::recipes_with_substitutions(
            self.catalog.recipes(),
            &selected,
            self.settings.max_missing_ingredients,
            &self.substitutions,
        )
    }

    // ------------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------------

    /// Detects ingredients in a photo and merges them into the selection
    ///
    /// The session lock is not held while the detector runs. Failures leave
    /// the selection untouched. If another detection starts before this
    /// result is applied, the result is discarded; the check and the merge
    /// happen under one write lock so a newer request cannot slip in between.
    pub async fn detect_from_image(&self, detector: &dyn IngredientDetector, image: &ImageInput) -> DetectionReport {
        let request_id = self.detections.begin().await;

        let result = detection::detect_ingredients(detector, image, self.settings.detection_timeout).await;

        let mut state = self.state.write().await;
        if !self.detections.is_current(request_id).await {
            tracing::debug!(request_id = %request_id, "Detection result superseded");
            return DetectionReport::Superseded;
        }

        match result {
            Ok(detected) => {
                let added = merge_into(&mut state, &detected);
                DetectionReport::Added { detected, added }
            }
            Err(error) => {
                tracing::info!(request_id = %request_id, error = %error, "Detection failed");
                DetectionReport::Failed {
                    message: error.user_message(),
                    error,
                }
            }
        }
    }
}

fn merge_into(state: &mut SessionState, detected: &[String]) -> Vec<String> {
    let mut added = Vec::new();
    for ingredient in detected {
        let ingredient = ingredient.to_lowercase();
        if !state.selected_ingredients.contains(&ingredient) {
            state.selected_ingredients.push(ingredient.clone());
            added.push(ingredient);
        }
    }
    added
}
