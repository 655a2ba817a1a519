//! File catalog
//!
//! The catalog is the flattened view of every file under every root in
//!  the ledger, rebuilt from scratch on each load:
//!
//! - **[`FileRecord`]**: one displayable file, adapted from the storage
//!   network's metadata and the root's pin status
//! - **[`Catalog`]**: ordered records plus their total size, and the
//!   roots whose lookup failed
//! - **[`CatalogBuilder`]**: fans out one lookup per root and joins them
//!
//! A failed lookup never aborts the build: the root is reported in
//!  [`Catalog::failures`] and everything else is still listed.

mod builder;
mod record;

pub use builder::CatalogBuilder;
pub use record::{Catalog, FileRecord, LookupFailure, PinStatus};
