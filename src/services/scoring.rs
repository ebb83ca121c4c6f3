use crate::models::{Difficulty, Recipe, UserRating};
use crate::services::matcher;

pub const RATING_WEIGHT: f64 = 10.0;
pub const DIETARY_WEIGHT: f64 = 5.0;
pub const COVERAGE_WEIGHT: f64 = 20.0;
pub const EASY_BONUS: f64 = 2.0;
pub const QUICK_BONUS: f64 = 3.0;
/// Recipes at or under this many minutes get the quick bonus
pub const QUICK_RECIPE_MINUTES: u32 = 30;

/// Computes how desirable a recipe is for the current user
///
/// Additive and independent per recipe:
/// 1. the user's own rating of the recipe, times 10
/// 2. 5 per dietary tag shared between recipe and user
/// 3. 20 times the fraction of the recipe's ingredient count covered by
///    matching available ingredients (can exceed 20 when the user lists more
///    matching terms than the recipe has ingredients)
/// 4. +2 for easy recipes
/// 5. +3 for recipes taking 30 minutes or less
pub fn score<D, A>(recipe: &Recipe, ratings: &[UserRating], user_dietary: &[D], available_ingredients: &[A]) -> f64
where
    D: AsRef<str>,
    A: AsRef<str>,
{
    let mut score = 0.0;

    if let Some(rating) = ratings.iter().find(|r| r.recipe_id == recipe.id) {
        score += rating.rating as f64 * RATING_WEIGHT;
    }

    score += dietary_overlap(recipe, user_dietary) as f64 * DIETARY_WEIGHT;

    score += coverage(recipe, available_ingredients) * COVERAGE_WEIGHT;

    if recipe.difficulty == Difficulty::Easy {
        score += EASY_BONUS;
    }

    if recipe.cooking_time <= QUICK_RECIPE_MINUTES {
        score += QUICK_BONUS;
    }

    score
}

/// Number of the recipe's dietary tags that the user also selected
pub fn dietary_overlap<D: AsRef<str>>(recipe: &Recipe, user_dietary: &[D]) -> usize {
    recipe
        .dietary
        .iter()
        .filter(|tag| user_dietary.iter().any(|d| d.as_ref() == tag.as_str()))
        .count()
}

/// Matching available ingredients divided by the recipe's ingredient count
fn coverage<A: AsRef<str>>(recipe: &Recipe, available_ingredients: &[A]) -> f64 {
    if available_ingredients.is_empty() || recipe.ingredients.is_empty() {
        return 0.0;
    }
    matcher::count_matches(available_ingredients, recipe) as f64 / recipe.ingredients.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::fixtures::{recipe, strings};

    const NONE: &[&str] = &[];

    fn rating(recipe_id: &str, value: u8) -> UserRating {
        UserRating {
            recipe_id: recipe_id.to_string(),
            rating: value,
            timestamp: 0,
        }
    }

    #[test]
    fn test_base_bonuses() {
        let easy_quick = recipe("a", &["chicken"], Difficulty::Easy, 20);
        assert_eq!(score(&easy_quick, &[], NONE, NONE), 5.0);

        let hard_slow = recipe("b", &["chicken"], Difficulty::Hard, 31);
        assert_eq!(score(&hard_slow, &[], NONE, NONE), 0.0);

        let medium_boundary = recipe("c", &["chicken"], Difficulty::Medium, 30);
        assert_eq!(score(&medium_boundary, &[], NONE, NONE), 3.0);
    }

    #[test]
    fn test_rating_term_only_for_matching_recipe() {
        let r = recipe("a", &["chicken"], Difficulty::Hard, 60);
        assert_eq!(score(&r, &[rating("a", 4)], NONE, NONE), 40.0);
        assert_eq!(score(&r, &[rating("other", 5)], NONE, NONE), 0.0);
    }

    #[test]
    fn test_raising_rating_adds_ten_per_star() {
        let r = recipe("a", &["chicken", "rice"], Difficulty::Easy, 25);
        let available = ["rice"];
        let low = score(&r, &[rating("a", 2)], &["vegan"], &available);
        let high = score(&r, &[rating("a", 5)], &["vegan"], &available);
        assert_eq!(high - low, 30.0);
    }

    #[test]
    fn test_dietary_affinity_counts_intersection() {
        let mut r = recipe("b", &["tofu"], Difficulty::Hard, 60);
        r.dietary = strings(&["vegan", "gluten-free"]);
        assert_eq!(score(&r, &[], &["vegan"], NONE), 5.0);
        assert_eq!(score(&r, &[], &["vegan", "gluten-free", "keto"], NONE), 10.0);
    }

    #[test]
    fn test_coverage_uses_recipe_ingredient_count() {
        let r = recipe("c", &["chicken", "rice", "soy sauce", "garlic"], Difficulty::Hard, 60);
        assert_eq!(score(&r, &[], NONE, &["chicken"]), 5.0);
        assert_eq!(score(&r, &[], NONE, &["chicken", "rice"]), 10.0);
        assert_eq!(score(&r, &[], NONE, &["tofu"]), 0.0);
    }

    #[test]
    fn test_coverage_can_exceed_full_weight() {
        // Three user terms all hit the single "bell pepper" ingredient
        let r = recipe("d", &["bell pepper"], Difficulty::Hard, 60);
        assert_eq!(score(&r, &[], NONE, &["pepper", "bell", "bell pepper"]), 60.0);
    }

    #[test]
    fn test_adding_matching_ingredient_never_lowers_score() {
        let r = recipe("e", &["chicken", "rice", "onion"], Difficulty::Medium, 45);
        let mut available: Vec<&str> = Vec::new();
        let mut previous = score(&r, &[], NONE, &available);
        for term in ["onion", "tofu", "rice", "chicken"] {
            available.push(term);
            let current = score(&r, &[], NONE, &available);
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 20.0);
    }
}
