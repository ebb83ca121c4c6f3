/// Ingredients offered as quick picks while typing
pub const COMMON_INGREDIENTS: &[&str] = &[
    "chicken", "beef", "pork", "shrimp", "salmon", "egg",
    "tomato", "onion", "garlic", "carrot", "broccoli", "spinach",
    "bell pepper", "mushroom", "potato", "rice", "pasta", "flour",
    "cheese", "milk", "butter", "olive oil", "soy sauce", "salt",
    "pepper", "basil", "lemon", "lime",
];

/// Common ingredients containing `input`, minus those already selected
pub fn suggest_ingredients<S: AsRef<str>>(input: &str, selected: &[S]) -> Vec<&'static str> {
    let needle = input.to_lowercase();
    COMMON_INGREDIENTS
        .iter()
        .copied()
        .filter(|ing| ing.contains(needle.as_str()))
        .filter(|ing| !selected.iter().any(|s| s.as_ref() == *ing))
        .collect()
}

/// Normalizes free-text ingredient input; `None` when nothing is left
pub fn normalize_ingredient(input: &str) -> Option<String> {
    let trimmed = input.trim().to_lowercase();
    (!trimmed.is_empty()).then_some(trimmed)
}
