//! Invoice record store
//!
//! The collection lives in a single JSON array. Callers only see the
//! [`InvoiceStore`] operations; how the file is read and written stays
//! behind [`JsonFileStore`].
//!
//! # Concurrency
//!
//! Every operation reads the whole file and rewrites it in full, with no
//! locking and no temp-file/rename step. Two processes appending at the same
//! time can lose one of the records (the later full rewrite wins), and a crash
//! mid-write can truncate the file.

mod json_file;

use std::path::PathBuf;

use shared::InvoiceRecord;
use thiserror::Error;

pub use json_file::JsonFileStore;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a valid invoice list
    #[error("Malformed invoice file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded
    #[error("Failed to serialize invoices: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable list of invoice records
pub trait InvoiceStore {
    /// Every stored record in insertion order; empty if nothing was saved yet
    fn load_all(&self) -> StoreResult<Vec<InvoiceRecord>>;

    /// Add a record after all existing ones
    fn append(&self, record: &InvoiceRecord) -> StoreResult<()>;

    /// Replace the first record with the same `order_number`
    ///
    /// Returns whether a record was replaced. A missing key is not an error;
    /// the collection is still written back unchanged, so a store with no
    /// backing file ends up with an empty list on disk.
    fn update_by_key(&self, record: &InvoiceRecord) -> StoreResult<bool>;

    /// First record with the given `order_number`
    fn find_by_key(&self, order_number: &str) -> StoreResult<Option<InvoiceRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|r| r.order_number == order_number))
    }
}
