//! Upload history
//!
//! The ledger is the list of content roots this user has uploaded,
//!  persisted as a JSON array of strings under [`LEDGER_KEY`]. It is
//!  append-only: the only mutation is pushing a freshly returned root.
//!  Duplicates may exist in storage and are collapsed on read, first
//!  occurrence wins.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::identifier::Identifier;
use crate::store::{KeyValueStore, StoreError};

/// Key the ledger is persisted under
pub const LEDGER_KEY: &str = "rootCidArray";

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger store error: {0}")]
    Store(#[from] StoreError),
    #[error("ledger is not a JSON array of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where an appended identifier ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Written to the backing store
    Persisted,
    /// The store could not be written; the identifier is only
    ///  remembered for the lifetime of this [`Ledger`]
    SessionOnly,
}

/// Remove duplicate identifiers, keeping the first occurrence of each
///  and preserving order.
pub fn dedup<I>(ids: I) -> Vec<Identifier>
where
    I: IntoIterator<Item = Identifier>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    // identifiers we failed to persist. never a copy of persisted state
    session_only: Mutex<Vec<Identifier>>,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session_only: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Identifiers that could not be persisted this session
    pub fn session_only(&self) -> Vec<Identifier> {
        self.session_only.lock().clone()
    }

    /// Record a new upload root.
    ///
    /// Never fails: if the store is unavailable the identifier is
    ///  kept in memory for the rest of this session and a warning
    ///  is logged.
    pub async fn append(&self, id: Identifier) -> Persistence {
        match self.persist(&id).await {
            Ok(()) => {
                tracing::debug!(identifier = %id, "appended identifier to ledger");
                Persistence::Persisted
            }
            Err(e) => {
                tracing::warn!(
                    identifier = %id,
                    error = %e,
                    "ledger persistence unavailable, keeping identifier for this session only"
                );
                self.session_only.lock().push(id);
                Persistence::SessionOnly
            }
        }
    }

    /// Every identifier in the ledger, deduplicated, in first-seen order.
    ///
    /// Reads the store on every call. Identifiers that could not be
    ///  persisted this session follow the persisted ones. An unreadable
    ///  store is treated like an empty one; a stored value that is not a
    ///  JSON array of strings is an error.
    pub async fn load_all(&self) -> Result<Vec<Identifier>, LedgerError> {
        let persisted = match self.read_persisted().await {
            Ok(raw) => raw,
            Err(LedgerError::Store(e)) => {
                tracing::warn!(error = %e, "ledger store unreadable, using session entries only");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let persisted = persisted
            .into_iter()
            .filter_map(|raw| match Identifier::new(&raw) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(entry = %raw, error = %e, "skipping invalid ledger entry");
                    None
                }
            });
        let session_only = self.session_only();

        Ok(dedup(persisted.chain(session_only)))
    }

    async fn read_persisted(&self) -> Result<Vec<String>, LedgerError> {
        match self.store.get_item(LEDGER_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, id: &Identifier) -> Result<(), LedgerError> {
        let mut raw = self.read_persisted().await?;
        raw.push(id.to_string());
        let value = serde_json::to_string(&raw)?;
        self.store.set_item(LEDGER_KEY, &value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testkit::UnavailableStore;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let ids = vec![id("a"), id("b"), id("a"), id("c"), id("b")];
        assert_eq!(dedup(ids), vec![id("a"), id("b"), id("c")]);
    }

    #[tokio::test]
    async fn test_load_all_empty_store() {
        let ledger = Ledger::new(MemoryStore::new());
        assert!(ledger.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_all_dedups_stored_array() {
        let store = MemoryStore::new();
        store
            .set_item(LEDGER_KEY, r#"["a","b","a","c"]"#)
            .await
            .unwrap();
        let ledger = Ledger::new(store);

        assert_eq!(
            ledger.load_all().await.unwrap(),
            vec![id("a"), id("b"), id("c")]
        );
        // idempotent
        assert_eq!(
            ledger.load_all().await.unwrap(),
            vec![id("a"), id("b"), id("c")]
        );
    }

    #[tokio::test]
    async fn test_append_existing_identifier_appears_once() {
        let store = MemoryStore::new();
        store.set_item(LEDGER_KEY, r#"["x","y"]"#).await.unwrap();
        let ledger = Ledger::new(store.clone());

        assert_eq!(ledger.append(id("x")).await, Persistence::Persisted);

        let all = ledger.load_all().await.unwrap();
        assert_eq!(all, vec![id("x"), id("y")]);

        // the raw array keeps the push, dedup happens on read
        let raw = store.get_item(LEDGER_KEY).await.unwrap().unwrap();
        assert_eq!(raw, r#"["x","y","x"]"#);
    }

    #[tokio::test]
    async fn test_load_all_reflects_external_writes() {
        let store = MemoryStore::new();
        let ledger = Ledger::new(store.clone());
        ledger.append(id("first")).await;

        store
            .set_item(LEDGER_KEY, r#"["replaced"]"#)
            .await
            .unwrap();
        assert_eq!(ledger.load_all().await.unwrap(), vec![id("replaced")]);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let store = MemoryStore::new();
        store.set_item(LEDGER_KEY, "{not json").await.unwrap();
        let ledger = Ledger::new(store);
        assert!(matches!(
            ledger.load_all().await,
            Err(LedgerError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_entries_are_skipped() {
        let store = MemoryStore::new();
        store
            .set_item(LEDGER_KEY, r#"["a"," ","b"]"#)
            .await
            .unwrap();
        let ledger = Ledger::new(store);
        assert_eq!(ledger.load_all().await.unwrap(), vec![id("a"), id("b")]);
    }

    #[tokio::test]
    async fn test_append_falls_back_to_session_when_store_unavailable() {
        let ledger = Ledger::new(UnavailableStore);

        assert_eq!(ledger.append(id("a")).await, Persistence::SessionOnly);
        assert_eq!(ledger.append(id("b")).await, Persistence::SessionOnly);
        assert_eq!(ledger.append(id("a")).await, Persistence::SessionOnly);

        assert_eq!(ledger.load_all().await.unwrap(), vec![id("a"), id("b")]);
    }

    #[tokio::test]
    async fn test_append_onto_corrupt_value_does_not_overwrite_it() {
        let store = MemoryStore::new();
        store.set_item(LEDGER_KEY, "garbage").await.unwrap();
        let ledger = Ledger::new(store.clone());

        assert_eq!(ledger.append(id("a")).await, Persistence::SessionOnly);
        assert_eq!(
            store.get_item(LEDGER_KEY).await.unwrap().as_deref(),
            Some("garbage")
        );
    }
}
