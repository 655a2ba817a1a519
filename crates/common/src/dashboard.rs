use std::time::Duration;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::ledger::{Ledger, LedgerError};
use crate::session::{upload_files, Session, UploadError, UploadReceipt};
use crate::storage::{StorageService, DEFAULT_REQUEST_TIMEOUT};
use crate::store::KeyValueStore;

/// What [`Dashboard::upload`] hands back once the files are stored.
///  The reload that follows can still fail, e.g. on an unreadable
///  ledger; the receipt is kept either way.
#[derive(Debug)]
pub struct UploadOutcome {
    pub receipt: UploadReceipt,
    pub catalog: Result<Catalog, LedgerError>,
}

/// The signed-in view: the ledger, the storage network and the
///  catalog built from them.
///
/// Every load rebuilds the catalog from scratch; nothing is
///  updated incrementally.
#[derive(Debug)]
pub struct Dashboard<S, K> {
    ledger: Ledger<K>,
    builder: CatalogBuilder<S>,
    timeout: Duration,
}

impl<S, K> Dashboard<S, K>
where
    S: StorageService,
    K: KeyValueStore,
{
    pub fn new(storage: S, store: K) -> Self {
        Self {
            ledger: Ledger::new(store),
            builder: CatalogBuilder::new(storage),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.with_timeout(timeout);
        self.timeout = timeout;
        self
    }

    pub fn ledger(&self) -> &Ledger<K> {
        &self.ledger
    }

    /// Read the ledger and rebuild the catalog
    pub async fn load(&self) -> Result<Catalog, LedgerError> {
        let ids = self.ledger.load_all().await?;
        Ok(self.builder.build(&ids).await)
    }

    /// Upload the session's selection, then reload the whole catalog
    pub async fn upload(&self, session: &mut Session) -> Result<UploadOutcome, UploadError> {
        let receipt =
            upload_files(session, self.builder.storage(), &self.ledger, self.timeout).await?;

        let catalog = self.load().await;
        if let Err(e) = &catalog {
            tracing::warn!(
                identifier = %receipt.identifier,
                error = %e,
                "upload stored but catalog reload failed"
            );
        }
        Ok(UploadOutcome { receipt, catalog })
    }
}
