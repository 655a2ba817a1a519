use std::time::Duration;

use futures::future::join_all;

use super::record::{Catalog, FileRecord, LookupFailure};
use crate::identifier::Identifier;
use crate::ledger::dedup;
use crate::storage::{with_timeout, StorageError, StorageService, DEFAULT_REQUEST_TIMEOUT};

/// Builds a [`Catalog`] from a list of ledger roots.
#[derive(Debug, Clone)]
pub struct CatalogBuilder<S> {
    storage: S,
    timeout: Duration,
}

impl<S: StorageService> CatalogBuilder<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound each call into the storage network by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Look up every root concurrently and merge the results.
    ///
    /// Files are ordered by root (in the order given, duplicates
    ///  dropped) and then in the order the network lists them.
    ///  A root whose lookup fails or times out is skipped and
    ///  recorded in [`Catalog::failures`].
    pub async fn build(&self, ids: &[Identifier]) -> Catalog {
        let ids = dedup(ids.iter().cloned());
        let results = join_all(ids.iter().map(|id| self.lookup(id))).await;

        let mut catalog = Catalog::default();
        for (identifier, result) in ids.into_iter().zip(results) {
            match result {
                Ok(records) => catalog.push_files(records),
                Err(error) => {
                    tracing::warn!(%identifier, %error, "skipping root, lookup failed");
                    catalog.push_failure(LookupFailure { identifier, error });
                }
            }
        }

        tracing::debug!(
            files = catalog.len(),
            failures = catalog.failures().len(),
            total_size = catalog.total_size(),
            "catalog built"
        );
        catalog
    }

    async fn lookup(&self, id: &Identifier) -> Result<Vec<FileRecord>, StorageError> {
        tracing::debug!(identifier = %id, "looking up root");
        let (files, status) = tokio::try_join!(
            with_timeout(self.timeout, self.storage.get(id)),
            with_timeout(self.timeout, self.storage.status(id)),
        )?;

        Ok(files
            .into_iter()
            .map(|meta| FileRecord::from_metadata(id, meta, &status))
            .collect())
    }
}
