use std::fmt;

use chrono::{DateTime, Utc};

use crate::format::format_file_size;
use crate::identifier::Identifier;
use crate::storage::{FileMetadata, PinStatusReport, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStatus {
    /// The network holds a durable copy
    Pinned,
    /// Still being processed
    Queued,
}

impl fmt::Display for PinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinStatus::Pinned => f.write_str("Pinned"),
            PinStatus::Queued => f.write_str("Queued"),
        }
    }
}

impl From<&PinStatusReport> for PinStatus {
    fn from(report: &PinStatusReport) -> Self {
        if report.is_pinned() {
            PinStatus::Pinned
        } else {
            PinStatus::Queued
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    /// Identifier of the file itself
    pub cid: Identifier,
    /// Ledger root the file was uploaded under
    pub root: Identifier,
    pub pin_status: PinStatus,
}

impl FileRecord {
    /// Adapt the storage network's view of a file. Files without their
    ///  own timestamp take the root's creation time.
    pub fn from_metadata(root: &Identifier, meta: FileMetadata, status: &PinStatusReport) -> Self {
        Self {
            name: meta.name,
            size: meta.size,
            last_modified: meta.last_modified.or(status.created),
            cid: meta.cid,
            root: root.clone(),
            pin_status: status.into(),
        }
    }
}

#[derive(Debug)]
pub struct LookupFailure {
    pub identifier: Identifier,
    pub error: StorageError,
}

#[derive(Debug, Default)]
pub struct Catalog {
    files: Vec<FileRecord>,
    total_size: u64,
    failures: Vec<LookupFailure>,
}

impl Catalog {
    pub(crate) fn push_files(&mut self, records: Vec<FileRecord>) {
        self.total_size = records
            .iter()
            .fold(self.total_size, |acc, record| acc.saturating_add(record.size));
        self.files.extend(records);
    }

    pub(crate) fn push_failure(&mut self, failure: LookupFailure) {
        self.failures.push(failure);
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Sum of the sizes of every listed file
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn formatted_total_size(&self) -> String {
        format_file_size(self.total_size)
    }

    /// Roots whose files could not be retrieved
    pub fn failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
