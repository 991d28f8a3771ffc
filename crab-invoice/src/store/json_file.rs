//! JSON file backed store

use std::fs;
use std::path::{Path, PathBuf};

use shared::{InvoiceRecord, StoredInvoice};
use tracing::{debug, info, instrument};

use super::{InvoiceStore, StoreError, StoreResult};

/// Store backed by one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Rewrite the whole file with `records`
    fn write_all(&self, records: &[InvoiceRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;

        debug!(count = records.len(), "Invoice file rewritten");
        Ok(())
    }
}

impl InvoiceStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> StoreResult<Vec<InvoiceRecord>> {
        if !self.path.exists() {
            debug!("Invoice file not found, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let stored: Vec<StoredInvoice> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let legacy = stored.iter().filter(|s| s.is_legacy()).count();
        if legacy > 0 {
            info!(legacy, "Upgraded single-product invoices");
        }

        Ok(stored.into_iter().map(StoredInvoice::into_record).collect())
    }

    #[instrument(skip(self, record), fields(path = %self.path.display(), order_number = %record.order_number))]
    fn append(&self, record: &InvoiceRecord) -> StoreResult<()> {
        let mut records = self.load_all()?;
        records.push(record.clone());
        self.write_all(&records)
    }

    #[instrument(skip(self, record), fields(path = %self.path.display(), order_number = %record.order_number))]
    fn update_by_key(&self, record: &InvoiceRecord) -> StoreResult<bool> {
        let mut records = self.load_all()?;

        let replaced = match records
            .iter_mut()
            .find(|r| r.order_number == record.order_number)
        {
            Some(slot) => {
                *slot = record.clone();
                true
            }
            None => {
                debug!("No invoice with this order number, nothing replaced");
                false
            }
        };

        self.write_all(&records)?;
        Ok(replaced)
    }
}
