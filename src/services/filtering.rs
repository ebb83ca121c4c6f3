use std::cmp::Reverse;

use crate::models::{Recipe, RecipeFilters};
use crate::services::matcher;

/// Applies the ingredient filter and then the predicate filters
///
/// When ingredients are selected, only recipes matching at least one of them
/// are kept, ordered by how many of them they match (most first, ties in
/// catalog order). Difficulty, cooking time and dietary filters follow as an
/// AND chain; the dietary filter requires every selected tag.
pub fn filter_recipes<'a, S: AsRef<str>>(
    catalog: &'a [Recipe],
    selected_ingredients: &[S],
    filters: &RecipeFilters,
) -> Vec<&'a Recipe> {
    let mut filtered: Vec<&Recipe> = catalog.iter().collect();

    if !selected_ingredients.is_empty() {
        let mut counted: Vec<(&Recipe, usize)> = filtered
            .into_iter()
            .map(|recipe| (recipe, matcher::count_matches(selected_ingredients, recipe)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counted.sort_by_key(|(_, count)| Reverse(*count));
        filtered = counted.into_iter().map(|(recipe, _)| recipe).collect();
    }

    let filtered: Vec<&Recipe> = filtered
        .into_iter()
        .filter(|recipe| matches_difficulty(recipe, filters))
        .filter(|recipe| recipe.cooking_time <= filters.max_cooking_time)
        .filter(|recipe| matches_dietary(recipe, filters))
        .collect();

    tracing::debug!(
        selected_ingredients = selected_ingredients.len(),
        results = filtered.len(),
        "Filtered recipes"
    );

    filtered
}

fn matches_difficulty(recipe: &Recipe, filters: &RecipeFilters) -> bool {
    filters.difficulty.is_empty() || filters.difficulty.contains(&recipe.difficulty)
}

fn matches_dietary(recipe: &Recipe, filters: &RecipeFilters) -> bool {
    filters.dietary.iter().all(|tag| recipe.has_dietary(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::fixtures::{recipe, strings};
    use crate::models::Difficulty;

    const NONE: &[&str] = &[];

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    fn catalog() -> Vec<Recipe> {
        let mut stir_fry = recipe("stir-fry", &["chicken", "rice", "bell pepper"], Difficulty::Medium, 25);
        stir_fry.dietary = strings(&["dairy-free"]);
        let mut salad = recipe("salad", &["spinach", "tomato", "olive oil"], Difficulty::Easy, 10);
        salad.dietary = strings(&["vegan", "vegetarian", "gluten-free"]);
        let stew = recipe("stew", &["beef", "carrot", "onion", "pepper"], Difficulty::Hard, 45);
        vec![stir_fry, salad, stew]
    }

    #[test]
    fn test_single_ingredient_scenario() {
        let catalog = vec![recipe("a", &["chicken", "rice"], Difficulty::Easy, 20)];
        let result = filter_recipes(&catalog, &["chicken"], &RecipeFilters::default());
        assert_eq!(ids(&result), vec!["a"]);
        let count = matcher::count_matches(&["chicken"], result[0]);
        assert_eq!(count, 1);
        assert_eq!(matcher::match_badge(count).as_deref(), Some("1 matching ingredient"));
    }

    #[test]
    fn test_no_ingredients_keeps_catalog_order() {
        let catalog = catalog();
        let result = filter_recipes(&catalog, NONE, &RecipeFilters::default());
        assert_eq!(ids(&result), vec!["stir-fry", "salad", "stew"]);
    }

    #[test]
    fn test_sorted_by_match_count() {
        let catalog = catalog();
        let result = filter_recipes(&catalog, &["pepper", "onion", "tomato"], &RecipeFilters::default());
        // stew matches pepper+onion, stir-fry pepper, salad tomato
        assert_eq!(ids(&result), vec!["stew", "stir-fry", "salad"]);
    }

    #[test]
    fn test_unmatched_recipes_dropped() {
        let catalog = catalog();
        let result = filter_recipes(&catalog, &["spinach"], &RecipeFilters::default());
        assert_eq!(ids(&result), vec!["salad"]);
        assert!(filter_recipes(&catalog, &["durian"], &RecipeFilters::default()).is_empty());
    }

    #[test]
    fn test_max_cooking_time_always_applies() {
        let catalog = catalog();
        let filters = RecipeFilters {
            max_cooking_time: 30,
            ..RecipeFilters::default()
        };
        let result = filter_recipes(&catalog, &["beef", "carrot"], &filters);
        assert!(result.is_empty());

        let result = filter_recipes(&catalog, NONE, &filters);
        assert_eq!(ids(&result), vec!["stir-fry", "salad"]);
    }

    #[test]
    fn test_difficulty_filter() {
        let catalog = catalog();
        let mut filters = RecipeFilters::default();
        filters.toggle_difficulty(Difficulty::Easy);
        filters.toggle_difficulty(Difficulty::Hard);
        let result = filter_recipes(&catalog, NONE, &filters);
        assert_eq!(ids(&result), vec!["salad", "stew"]);
    }

    #[test]
    fn test_dietary_filter_requires_all_tags() {
        let catalog = catalog();
        let mut filters = RecipeFilters::default();
        filters.toggle_dietary("vegan");
        filters.toggle_dietary("gluten-free");
        assert_eq!(ids(&filter_recipes(&catalog, NONE, &filters)), vec!["salad"]);

        filters.toggle_dietary("dairy-free");
        assert!(filter_recipes(&catalog, NONE, &filters).is_empty());
    }
}
