//! Invoice PDF output
//!
//! - `renderer`: lays an invoice out as a paginated A4 document
//! - [`save_pdf`]: renders and writes `invoice_{order_number}.pdf`

pub mod renderer;

use std::fs;
use std::path::{Path, PathBuf};

use crab_pdf::PdfError;
use shared::InvoiceRecord;
use thiserror::Error;

pub use renderer::{INVOICE_TITLE, InvoiceRenderer, pdf_file_name};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render `invoice` into `dir`, creating the directory if needed
///
/// Returns the written path. An existing file with the same name is replaced.
pub fn save_pdf(invoice: &InvoiceRecord, dir: &Path) -> RenderResult<PathBuf> {
    let bytes = InvoiceRenderer::new().render(invoice)?;
    let path = dir.join(pdf_file_name(invoice));

    let write_err = |source| RenderError::Write {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    fs::write(&path, &bytes).map_err(write_err)?;

    tracing::info!(path = %path.display(), size = bytes.len(), "Invoice PDF written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Decimal, LineItem};

    fn invoice(name: &str) -> InvoiceRecord {
        InvoiceRecord {
            date: "2024-05-01".to_string(),
            timestamp: "2024-05-01 10:00:00".to_string(),
            platform: "Daraz".to_string(),
            name: name.to_string(),
            order_number: "1001".to_string(),
            contact: String::new(),
            address: String::new(),
            advance: Decimal::ZERO,
            cod: Decimal::ZERO,
            total: Decimal::ONE,
            products: vec![LineItem::new("Phone", "", 1, Decimal::ONE)],
        }
    }

    #[test]
    fn test_save_pdf_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pdf");

        let path = save_pdf(&invoice("Ali"), &out).unwrap();

        assert_eq!(path, out.join("invoice_1001.pdf"));
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_encoding_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let err = save_pdf(&invoice("Ωmega ☃"), dir.path()).unwrap_err();

        assert!(matches!(err, RenderError::Pdf(PdfError::Encoding(_))));
        assert!(!dir.path().join("invoice_1001.pdf").exists());
    }
}
