//! In-process stand-ins for the external services, for tests.
//!
//! ```rust,ignore
//! use common::testkit::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let root = storage.insert_root("bafyroot", vec![("a.txt", 100)]);
//! storage.pin(&root);
//! storage.fail_lookups_for(&root);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::identifier::Identifier;
use crate::storage::{
    FileMetadata, Pin, PinStatusReport, StorageError, StorageService, UploadFile,
};
use crate::store::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
struct MemoryStorageInner {
    roots: HashMap<Identifier, Vec<FileMetadata>>,
    created: HashMap<Identifier, DateTime<Utc>>,
    pinned: HashSet<Identifier>,
    failing: HashSet<Identifier>,
    delayed: HashMap<Identifier, Duration>,
    fail_puts: bool,
    put_calls: usize,
    next_root: u64,
}

/// Storage network held in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryStorageInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root holding `files` given as `(name, size)` pairs
    pub fn insert_root(&self, root: &str, files: Vec<(&str, u64)>) -> Identifier {
        let root = Identifier::new(root).expect("test root must not be blank");
        let files = files
            .into_iter()
            .map(|(name, size)| FileMetadata {
                name: name.to_string(),
                size,
                cid: Identifier::new(format!("{}-{}", root, name))
                    .expect("file identifier is never blank"),
                last_modified: None,
            })
            .collect();
        self.inner.lock().roots.insert(root.clone(), files);
        root
    }

    pub fn set_created(&self, root: &Identifier, created: DateTime<Utc>) {
        self.inner.lock().created.insert(root.clone(), created);
    }

    pub fn pin(&self, root: &Identifier) {
        self.inner.lock().pinned.insert(root.clone());
    }

    /// Make `get` and `status` fail for `root`
    pub fn fail_lookups_for(&self, root: &Identifier) {
        self.inner.lock().failing.insert(root.clone());
    }

    /// Make `get` and `status` for `root` take `delay` before answering
    pub fn delay_lookups_for(&self, root: &Identifier, delay: Duration) {
        self.inner.lock().delayed.insert(root.clone(), delay);
    }

    /// Make every `put` fail
    pub fn fail_puts(&self) {
        self.inner.lock().fail_puts = true;
    }

    /// Number of times `put` has been called, failed calls included
    pub fn put_calls(&self) -> usize {
        self.inner.lock().put_calls
    }

    /// Check for injected failures and delays before a lookup
    async fn before_lookup(&self, id: &Identifier) -> Result<(), StorageError> {
        let (failing, delay) = {
            let inner = self.inner.lock();
            (inner.failing.contains(id), inner.delayed.get(id).copied())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(StorageError::Other(format!("injected failure for {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn put(&self, files: Vec<UploadFile>) -> Result<Identifier, StorageError> {
        let mut inner = self.inner.lock();
        inner.put_calls += 1;
        if inner.fail_puts {
            return Err(StorageError::Other("injected put failure".to_string()));
        }

        inner.next_root += 1;
        let root = Identifier::new(format!("bafymemoryroot{:08}", inner.next_root))
            .expect("generated root is never blank");
        let metadata = files
            .into_iter()
            .map(|file| FileMetadata {
                cid: Identifier::new(format!("{}-{}", root, file.name))
                    .expect("file identifier is never blank"),
                size: file.size(),
                name: file.name,
                last_modified: None,
            })
            .collect();
        inner.roots.insert(root.clone(), metadata);
        inner.created.insert(root.clone(), Utc::now());
        Ok(root)
    }

    async fn get(&self, id: &Identifier) -> Result<Vec<FileMetadata>, StorageError> {
        self.before_lookup(id).await?;
        self.inner
            .lock()
            .roots
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    async fn status(&self, id: &Identifier) -> Result<PinStatusReport, StorageError> {
        self.before_lookup(id).await?;
        let inner = self.inner.lock();
        if !inner.roots.contains_key(id) {
            return Err(StorageError::NotFound(id.clone()));
        }
        let pins = if inner.pinned.contains(id) {
            vec![Pin {
                kind: "recursive".to_string(),
            }]
        } else {
            Vec::new()
        };
        Ok(PinStatusReport {
            created: inner.created.get(id).copied(),
            pins,
        })
    }
}

/// A [`KeyValueStore`] whose every operation fails
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}
