use crate::models::Recipe;

/// Decides whether a user ingredient and a recipe ingredient refer to the same thing
///
/// Case-insensitive containment in either direction, so "pepper" matches
/// "bell pepper". This is intentionally loose: "egg" also matches "eggplant".
pub fn matches(user_term: &str, recipe_ingredient: &str) -> bool {
    let user_term = user_term.to_lowercase();
    let recipe_ingredient = recipe_ingredient.to_lowercase();
    recipe_ingredient.contains(&user_term) || user_term.contains(&recipe_ingredient)
}

/// True if any of the recipe's ingredients matches the user ingredient
pub fn recipe_has(recipe: &Recipe, user_term: &str) -> bool {
    recipe.ingredients.iter().any(|ing| matches(user_term, ing))
}

/// Number of user ingredients that match at least one recipe ingredient
pub fn count_matches<S: AsRef<str>>(user_ingredients: &[S], recipe: &Recipe) -> usize {
    user_ingredients
        .iter()
        .filter(|term| recipe_has(recipe, term.as_ref()))
        .count()
}

/// The user ingredients that match the recipe, in the user's order
pub fn matching_ingredients<S: AsRef<str>>(user_ingredients: &[S], recipe: &Recipe) -> Vec<String> {
    user_ingredients
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| recipe_has(recipe, term))
        .map(str::to_string)
        .collect()
}

/// Badge text shown on a result card, e.g. "2 matching ingredients"
pub fn match_badge(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 matching ingredient".to_string()),
        n => Some(format!("{} matching ingredients", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::fixtures::recipe;
    use crate::models::Difficulty;

    #[test]
    fn test_matches_is_case_insensitive() {
        assert!(matches("Chicken", "chicken breast"));
        assert!(matches("chicken", "CHICKEN"));
    }

    #[test]
    fn test_matches_both_directions() {
        assert!(matches("pepper", "bell pepper"));
        assert!(matches("bell pepper", "pepper"));
        assert!(!matches("beef", "pork"));
    }

    #[test]
    fn test_matches_keeps_loose_substring_semantics() {
        assert!(matches("egg", "eggplant"));
    }

    #[test]
    fn test_matches_is_symmetric() {
        let samples = ["egg", "Eggplant", "bell pepper", "pepper", "rice", "", "RICE noodles"];
        for a in samples {
            for b in samples {
                assert_eq!(matches(a, b), matches(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_count_matches_counts_user_terms() {
        let r = recipe("r1", &["bell pepper", "red pepper", "onion"], Difficulty::Easy, 20);
        // One user term matching two recipe ingredients still counts once
        assert_eq!(count_matches(&["pepper"], &r), 1);
        assert_eq!(count_matches(&["pepper", "onion", "tofu"], &r), 2);
        assert_eq!(count_matches::<&str>(&[], &r), 0);
    }

    #[test]
    fn test_matching_ingredients_and_badge() {
        let r = recipe("r1", &["chicken", "rice"], Difficulty::Easy, 20);
        let matched = matching_ingredients(&["chicken", "tofu"], &r);
        assert_eq!(matched, vec!["chicken"]);
        assert_eq!(match_badge(matched.len()).as_deref(), Some("1 matching ingredient"));
        assert_eq!(match_badge(3).as_deref(), Some("3 matching ingredients"));
        assert_eq!(match_badge(0), None);
    }
}
