use tokio::sync::RwLock;

use crate::error::AppResult;

use super::PreferenceStore;

/// In-process store; the payload lives only as long as the store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    payload: RwLock<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing payload, e.g. one restored from elsewhere
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RwLock::new(Some(payload.into())),
        }
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn read(&self) -> AppResult<Option<String>> {
        Ok(self.payload.read().await.clone())
    }

    async fn write(&self, payload: String) -> AppResult<()> {
        *self.payload.write().await = Some(payload);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_write() {
        let store = MemoryPreferenceStore::new();
        tokio_test::block_on(async {
            assert_eq!(store.read().await.unwrap(), None);
            store.write("{}".to_string()).await.unwrap();
            assert_eq!(store.read().await.unwrap().as_deref(), Some("{}"));
        });
    }

    #[test]
    fn test_with_payload() {
        let store = MemoryPreferenceStore::with_payload("{\"dietary\":[\"vegan\"]}");
        let payload = tokio_test::block_on(store.read()).unwrap();
        assert!(payload.unwrap().contains("vegan"));
    }
}
