use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// One file under a content root, as reported by the storage network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
    /// Identifier of the file's own content
    pub cid: Identifier,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Backend specific pin kind, e.g. `recursive`
    pub kind: String,
}

/// Pinning state of one content root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinStatusReport {
    /// When the root was first seen, if the backend tracks it
    pub created: Option<DateTime<Utc>>,
    pub pins: Vec<Pin>,
}

impl PinStatusReport {
    pub fn is_pinned(&self) -> bool {
        !self.pins.is_empty()
    }
}
