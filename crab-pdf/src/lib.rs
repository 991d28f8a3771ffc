//! # crab-pdf
//!
//! Page layout and PDF output library - low-level document capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to lay out a document:
//! - Cursor-based cell layout with borders and fills
//! - Text wrapping and automatic page breaks
//! - Repeated page header and page-number footer
//! - WinAnsi text checks and Helvetica metrics
//! - PDF serialization (built-in fonts)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Invoice rendering → crab-invoice
//!
//! ## Example
//!
//! ```ignore
//! use crab_pdf::{Align, CellOpts, DocumentBuilder, PageSetup};
//!
//! let mut b = DocumentBuilder::new("Invoice", PageSetup::a4().with_header("Customer Invoice"));
//! b.cell(100.0, 10.0, "Date: 2024-05-01", CellOpts::new().ln())?;
//! b.cell(60.0, 10.0, "Phone", CellOpts::new().border())?;
//! b.cell(30.0, 10.0, "100.00", CellOpts::new().border().align(Align::Right).ln())?;
//!
//! let bytes = b.finish()?.to_pdf_bytes()?;
//! ```

mod encoding;
mod error;
mod layout;
mod pdf;

// Re-exports
pub use encoding::{ensure_winansi, text_width, to_winansi, truncate_to_width, wrap_to_width};
pub use error::{PdfError, PdfResult};
pub use layout::{
    Align, CELL_PADDING, CellOpts, Document, DocumentBuilder, Element, FontStyle, Page, PageSetup,
    RectBox, Rgb, TextRun,
};
