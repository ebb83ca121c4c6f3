pub mod detection;
pub mod filtering;
pub mod matcher;
pub mod recommendations;
pub mod scoring;
pub mod substitutions;
pub mod suggestions;

pub use detection::{DetectionError, HttpIngredientDetector, ImageInput, IngredientDetector};
pub use substitutions::SubstitutionTable;
