use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

use super::PreferenceStore;

/// Keeps the preference blob in a JSON file
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous payload intact.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn read(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, payload: String) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, payload).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserPreferences;
    use crate::store::{load_preferences, save_preferences};

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        let prefs = UserPreferences::new()
            .with_dietary(["vegan"])
            .toggle_favorite("r2")
            .rate("r2", 4, 1_700_000_000_000)
            .unwrap();
        save_preferences(&store, &prefs).await.unwrap();

        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert_eq!(load_preferences(&store).await, prefs);
    }

    #[tokio::test]
    async fn test_corrupted_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(load_preferences(&store).await, UserPreferences::default());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = FilePreferenceStore::new("/data/prefs.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/prefs.json.tmp"));
    }
}
