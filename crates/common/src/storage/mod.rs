//! Storage network adapter
//!
//! The rest of the crate only talks to the storage network through
//!  [`StorageService`]. [`KuboClient`] implements it against an IPFS
//!  node's HTTP RPC API; `testkit::MemoryStorage` implements it
//!  in-process for tests.

mod kubo;
mod types;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::identifier::{Identifier, IdentifierError};

pub use kubo::KuboClient;
pub use types::{FileMetadata, Pin, PinStatusReport, UploadFile};

/// Bound applied to every call into the storage network unless configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(reqwest::StatusCode, String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid identifier in response: {0}")]
    Identifier(#[from] IdentifierError),
    #[error("upload response did not include a root identifier")]
    MissingRoot,
    #[error("content root not found: {0}")]
    NotFound(Identifier),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("storage error: {0}")]
    Other(String),
}

/// The storage network as seen by this application
#[async_trait]
pub trait StorageService: Send + Sync + std::fmt::Debug {
    /// Submit `files` as a single upload and return the content
    ///  root naming all of them
    async fn put(&self, files: Vec<UploadFile>) -> Result<Identifier, StorageError>;

    /// List the files stored under a content root
    async fn get(&self, id: &Identifier) -> Result<Vec<FileMetadata>, StorageError>;

    /// Pinning state of a content root
    async fn status(&self, id: &Identifier) -> Result<PinStatusReport, StorageError>;
}

/// Run `fut`, failing with [`StorageError::Timeout`] if it does not
///  settle within `limit`
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StorageError::Timeout(limit))?
}
