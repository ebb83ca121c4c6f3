use std::collections::BTreeMap;

use crate::models::{Recipe, SubstitutionCandidate, UserRating};
use crate::services::{matcher, scoring, substitutions::SubstitutionTable};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;
pub const DEFAULT_PAGE_RECOMMENDATION_LIMIT: usize = 12;
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;
pub const DEFAULT_MAX_MISSING: usize = 3;

/// Generates personalized recipe recommendations
///
/// Every catalog recipe is scored with [`scoring::score`] and the best
/// `limit` are returned, highest first. Ties keep catalog order. There is no
/// minimum score, so a small catalog is returned in full.
pub fn recommended_recipes<'a, D, A>(
    catalog: &'a [Recipe],
    ratings: &[UserRating],
    user_dietary: &[D],
    available_ingredients: &[A],
    limit: usize,
) -> Vec<&'a Recipe>
where
    D: AsRef<str>,
    A: AsRef<str>,
{
    let mut scored: Vec<(&Recipe, f64)> = catalog
        .iter()
        .map(|recipe| {
            let score = scoring::score(recipe, ratings, user_dietary, available_ingredients);
            (recipe, score)
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(
        catalog_size = catalog.len(),
        limit,
        top_score = scored.first().map(|(_, s)| *s),
        "Ranked recommendations"
    );

    scored.into_iter().take(limit).map(|(recipe, _)| recipe).collect()
}

/// How alike two recipes are: cuisine, shared dietary tags, shared tags,
/// difficulty and cooking time
pub fn similarity_score(target: &Recipe, candidate: &Recipe) -> u32 {
    let mut score = 0;

    if candidate.cuisine == target.cuisine {
        score += 10;
    }

    let shared_dietary = candidate
        .dietary
        .iter()
        .filter(|d| target.has_dietary(d))
        .count() as u32;
    score += shared_dietary * 5;

    let shared_tags = candidate.tags.iter().filter(|t| target.has_tag(t)).count() as u32;
    score += shared_tags * 3;

    if candidate.difficulty == target.difficulty {
        score += 2;
    }

    if candidate.cooking_time.abs_diff(target.cooking_time) <= 15 {
        score += 2;
    }

    score
}

/// Recipes most like `target`, excluding `target` itself
pub fn similar_recipes<'a>(target: &Recipe, catalog: &'a [Recipe], limit: usize) -> Vec<&'a Recipe> {
    let mut scored: Vec<(&Recipe, u32)> = catalog
        .iter()
        .filter(|recipe| recipe.id != target.id)
        .map(|recipe| (recipe, similarity_score(target, recipe)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored.into_iter().take(limit).map(|(recipe, _)| recipe).collect()
}

/// Recipes that are at most `max_missing` ingredients short of makeable
///
/// A recipe ingredient is missing when no available ingredient fuzzy-matches
/// it. Known substitutes are attached for each missing ingredient. Output
/// keeps catalog order.
pub fn recipes_with_substitutions<'a, A: AsRef<str>>(
    catalog: &'a [Recipe],
    available_ingredients: &[A],
    max_missing: usize,
    table: &SubstitutionTable,
) -> Vec<SubstitutionCandidate<'a>> {
    let candidates: Vec<SubstitutionCandidate<'a>> = catalog
        .iter()
        .filter_map(|recipe| {
            let missing_ingredients: Vec<String> = recipe
                .ingredients
                .iter()
                .filter(|ing| {
                    !available_ingredients
                        .iter()
                        .any(|avail| matcher::matches(avail.as_ref(), ing))
                })
                .cloned()
                .collect();

            if missing_ingredients.len() > max_missing {
                return None;
            }

            let substitution_options: BTreeMap<String, Vec<String>> = missing_ingredients
                .iter()
                .filter_map(|ing| {
                    let subs = table.substitutes_for(ing);
                    (!subs.is_empty()).then(|| (ing.clone(), subs.to_vec()))
                })
                .collect();

            Some(SubstitutionCandidate {
                recipe,
                missing_ingredients,
                substitution_options,
                can_make_with_substitutions: true,
            })
        })
        .collect();

    tracing::debug!(
        available = available_ingredients.len(),
        max_missing,
        candidates = candidates.len(),
        "Found recipes makeable with substitutions"
    );

    candidates
}
