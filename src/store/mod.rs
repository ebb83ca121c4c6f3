use std::sync::Arc;

use crate::{config::Config, error::AppResult, models::UserPreferences};

pub mod file;
pub mod memory;
pub mod redis;

pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use self::redis::RedisPreferenceStore;

/// Backing storage for the serialized preference blob
///
/// Stores move opaque JSON text; decoding and the fallback for unreadable
/// payloads live in [`load_preferences`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored payload, or `None` if nothing has been saved yet
    async fn read(&self) -> AppResult<Option<String>>;

    /// Replaces the stored payload
    async fn write(&self, payload: String) -> AppResult<()>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Loads preferences, falling back to empty preferences on any failure
///
/// A missing payload is the first-use case. Unreadable storage and corrupted
/// JSON are logged and also yield defaults rather than failing the caller.
pub async fn load_preferences(store: &dyn PreferenceStore) -> UserPreferences {
    let payload = match store.read().await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::debug!(store = store.name(), "No saved preferences, starting empty");
            return UserPreferences::default();
        }
        Err(e) => {
            tracing::warn!(store = store.name(), error = %e, "Failed to read preferences, using defaults");
            return UserPreferences::default();
        }
    };

    match serde_json::from_str::<UserPreferences>(&payload) {
        Ok(prefs) => {
            let (prefs, dropped) = prefs.sanitized();
            if dropped > 0 {
                tracing::warn!(
                    store = store.name(),
                    dropped,
                    "Dropped invalid or duplicate ratings from saved preferences"
                );
            }
            tracing::debug!(
                store = store.name(),
                favorites = prefs.favorites.len(),
                ratings = prefs.ratings.len(),
                "Loaded preferences"
            );
            prefs
        }
        Err(e) => {
            tracing::warn!(store = store.name(), error = %e, "Saved preferences are malformed, using defaults");
            UserPreferences::default()
        }
    }
}

/// Serializes and writes preferences
pub async fn save_preferences(store: &dyn PreferenceStore, preferences: &UserPreferences) -> AppResult<()> {
    let payload = serde_json::to_string(preferences)?;
    store.write(payload).await?;
    tracing::debug!(store = store.name(), "Saved preferences");
    Ok(())
}

/// Opens the store selected by configuration: Redis when a URL is set, otherwise a JSON file
pub fn open_store(config: &Config) -> AppResult<Arc<dyn PreferenceStore>> {
    match &config.redis_url {
        Some(url) => {
            tracing::info!(key = %config.preferences_key, "Using Redis preference store");
            Ok(Arc::new(RedisPreferenceStore::new(url, &config.preferences_key)?))
        }
        None => {
            tracing::info!(path = %config.preferences_path, "Using file preference store");
            Ok(Arc::new(FilePreferenceStore::new(&config.preferences_path)))
        }
    }
}
