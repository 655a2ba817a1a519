//! Persisted key-value storage
//!
//! A tiny string-to-string store standing in for the browser's local
//! storage. Everything the application persists between runs (the
//! upload ledger, the session token) goes through a [`KeyValueStore`]:
//!
//! - **[`MemoryStore`]**: process-local, used by tests
//! - **[`FileStore`]**: one file per key inside a directory

mod file;
mod memory;
mod provider;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use provider::{KeyValueStore, StoreError};
