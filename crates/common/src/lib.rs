/**
 * Persisted key-value storage, the backing
 *  store for everything we keep between runs.
 */
pub mod store;
/**
 * Opaque content root identifiers.
 */
pub mod identifier;
/**
 * The deduplicated, append-only list of
 *  roots this user has uploaded.
 */
pub mod ledger;
/**
 * Adapter over the storage network:
 *  uploads, file listings and pin status.
 */
pub mod storage;
/**
 * Fan-out lookup of every ledger root into
 *  a flat list of files with a total size.
 */
pub mod catalog;
/**
 * Wallet sign in and the upload flow.
 */
pub mod session;
/**
 * Ledger + storage + catalog wired together,
 *  rebuilt wholesale on every load.
 */
pub mod dashboard;
/**
 * Display helpers for sizes, dates and identifiers.
 */
pub mod format;
pub mod clipboard;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogBuilder, FileRecord, LookupFailure, PinStatus};
    pub use crate::clipboard::{copy_to_clipboard, Clipboard, TerminalClipboard};
    pub use crate::dashboard::{Dashboard, UploadOutcome};
    pub use crate::format::{format_date, format_file_size, format_identifier, DateFormat};
    pub use crate::identifier::Identifier;
    pub use crate::ledger::{Ledger, LedgerError, Persistence};
    pub use crate::session::{
        KeyWallet, Session, SessionEvent, SessionState, UploadError, UploadReceipt,
        WalletProvider,
    };
    pub use crate::storage::{
        KuboClient, StorageError, StorageService, UploadFile, DEFAULT_REQUEST_TIMEOUT,
    };
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::version::build_info;
}
