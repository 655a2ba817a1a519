use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::provider::{validate_key, KeyValueStore, StoreError};

/// In-memory store backed by a HashMap. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let inner = self.inner.read().map_err(|e| {
            StoreError::Unavailable(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(inner.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut inner = self.inner.write().map_err(|e| {
            StoreError::Unavailable(format!("failed to acquire write lock: {}", e))
        })?;
        inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut inner = self.inner.write().map_err(|e| {
            StoreError::Unavailable(format!("failed to acquire write lock: {}", e))
        })?;
        inner.remove(key);
        Ok(())
    }
}
