//! Error types for the document library

use thiserror::Error;

/// Document error types
#[derive(Debug, Error)]
pub enum PdfError {
    /// Text contains characters the built-in fonts cannot show
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// PDF serialization failed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for document operations
pub type PdfResult<T> = Result<T, PdfError>;
