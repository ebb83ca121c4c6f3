//! Ingredient-driven recipe discovery: fuzzy ingredient matching, recipe
//! filtering, personalized recommendations, substitutions and photo-based
//! ingredient detection.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::{DetectionReport, RecipeSession, SessionSettings, SessionState};
