use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::provider::{validate_key, KeyValueStore, StoreError};

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Directory-backed store: every key is a file named `<key>.json`.
///  Writes go to a temporary sibling first and are renamed into
///  place, so a crash mid-write never leaves a torn value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, VALUE_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, TEMP_EXTENSION))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match tokio::fs::read_to_string(self.value_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = self.temp_path(key);
        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, self.value_path(key)).await?;
        tracing::trace!(key, dir = %self.dir.display(), "stored value");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match tokio::fs::remove_file(self.value_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
