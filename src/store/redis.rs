use redis::AsyncCommands;
use redis::Client;

use crate::error::AppResult;

use super::PreferenceStore;

/// Keeps the preference blob under a single Redis key
#[derive(Clone)]
pub struct RedisPreferenceStore {
    redis_client: Client,
    key: String,
}

impl RedisPreferenceStore {
    /// Creates the store; fails only if the URL is invalid, the connection is made lazily
    pub fn new(redis_url: &str, key: &str) -> AppResult<Self> {
        let redis_client = Client::open(redis_url)?;
        Ok(Self {
            redis_client,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait::async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn read(&self) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(&self.key).await.map_err(|e| {
            tracing::warn!(error = %e, key = %self.key, "Redis get failed");
            e
        })?;
        Ok(payload)
    }

    async fn write(&self, payload: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(&self.key, payload).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_key() {
        let store = RedisPreferenceStore::new("redis://127.0.0.1:6379", "userPreferences").unwrap();
        assert_eq!(store.key(), "userPreferences");
        assert_eq!(store.name(), "redis");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(RedisPreferenceStore::new("http://example.com", "k").is_err());
    }
}
