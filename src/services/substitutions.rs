use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Built-in substitutions: ingredient -> acceptable alternatives, best first
const DEFAULT_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    // Proteins
    ("chicken", &["turkey", "pork", "tofu"]),
    ("beef", &["pork", "lamb", "ground turkey"]),
    ("pork", &["chicken", "beef", "turkey"]),
    ("shrimp", &["prawns", "scallops", "fish"]),
    ("salmon", &["tuna", "trout", "mackerel"]),
    // Dairy
    ("milk", &["almond milk", "soy milk", "oat milk"]),
    ("butter", &["margarine", "coconut oil", "olive oil"]),
    ("cheese", &["nutritional yeast", "cashew cheese"]),
    ("mozzarella", &["provolone", "cheddar", "swiss"]),
    ("parmesan", &["pecorino", "asiago", "grana padano"]),
    ("sour cream", &["greek yogurt", "plain yogurt"]),
    // Vegetables
    ("spinach", &["kale", "swiss chard", "arugula"]),
    ("broccoli", &["cauliflower", "brussels sprouts"]),
    ("carrot", &["parsnip", "sweet potato"]),
    ("bell pepper", &["poblano pepper", "anaheim pepper"]),
    ("onion", &["shallot", "leek", "scallion"]),
    ("tomato", &["canned tomatoes", "tomato paste", "tomato sauce"]),
    // Grains & pasta
    ("rice", &["quinoa", "couscous", "bulgur"]),
    ("pasta", &["rice noodles", "zucchini noodles", "soba noodles"]),
    ("flour", &["almond flour", "coconut flour", "whole wheat flour"]),
    ("bread", &["tortilla", "pita", "naan"]),
    // Seasonings
    ("basil", &["oregano", "thyme", "parsley"]),
    ("oregano", &["basil", "marjoram", "thyme"]),
    ("soy sauce", &["tamari", "coconut aminos", "worcestershire sauce"]),
    ("lemon", &["lime", "vinegar"]),
    ("lime", &["lemon", "vinegar"]),
    ("garlic", &["garlic powder", "shallot"]),
    ("ginger", &["ginger powder", "galangal"]),
    // Other
    ("egg", &["flax egg", "chia egg", "applesauce"]),
    ("olive oil", &["vegetable oil", "canola oil", "avocado oil"]),
    ("white wine", &["chicken broth", "apple cider vinegar", "white grape juice"]),
    ("sugar", &["honey", "maple syrup", "agave"]),
];

/// Static lookup from an ingredient to its acceptable substitutes
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: HashMap<String, Vec<String>>,
}

fn normalize(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

impl SubstitutionTable {
    /// Builds a table; keys are normalized so lookups are case- and whitespace-insensitive
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, subs)| (normalize(k.as_ref()), subs.into_iter().map(Into::into).collect()))
            .collect();
        Self { entries }
    }

    /// The process-wide built-in table
    pub fn builtin() -> &'static SubstitutionTable {
        Self::builtin_arc()
    }

    /// A handle to the built-in table; every call shares the same allocation
    pub fn shared() -> Arc<SubstitutionTable> {
        Arc::clone(Self::builtin_arc())
    }

    fn builtin_arc() -> &'static Arc<SubstitutionTable> {
        static TABLE: OnceLock<Arc<SubstitutionTable>> = OnceLock::new();
        TABLE.get_or_init(|| {
            Arc::new(SubstitutionTable::new(
                DEFAULT_SUBSTITUTIONS
                    .iter()
                    .map(|(k, subs)| (*k, subs.to_vec())),
            ))
        })
    }

    /// Substitutes for an ingredient; empty when the ingredient is unknown
    ///
    /// Lookup is exact after normalization: "2 cups milk" has no entry even
    /// though "milk" does.
    pub fn substitutes_for(&self, ingredient: &str) -> &[String] {
        self.entries
            .get(&normalize(ingredient))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substitutes from the built-in table
pub fn substitutes_for(ingredient: &str) -> &'static [String] {
    SubstitutionTable::builtin().substitutes_for(ingredient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_entries() {
        assert_eq!(SubstitutionTable::builtin().len(), 32);
    }

    #[test]
    fn test_shared_table_is_not_copied() {
        let a = SubstitutionTable::shared();
        let b = SubstitutionTable::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), SubstitutionTable::builtin()));
    }

    #[test]
    fn test_milk_substitutes_in_order() {
        assert_eq!(substitutes_for("milk"), ["almond milk", "soy milk", "oat milk"]);
    }

    #[test]
    fn test_lookup_normalizes_input() {
        assert_eq!(substitutes_for("  Bell Pepper "), ["poblano pepper", "anaheim pepper"]);
    }

    #[test]
    fn test_unknown_ingredient_is_empty() {
        assert!(substitutes_for("dragonfruit").is_empty());
        assert!(substitutes_for("").is_empty());
    }

    #[test]
    fn test_custom_table_normalizes_keys() {
        let table = SubstitutionTable::new(vec![(" Tahini ", vec!["peanut butter"])]);
        assert_eq!(table.substitutes_for("tahini"), ["peanut butter"]);
        assert!(SubstitutionTable::default().is_empty());
    }
}
