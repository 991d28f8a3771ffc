//! Crab Invoice - customer invoice records with PDF output
//!
//! # Overview
//!
//! - **Record store** (`store`): invoices kept in one JSON file
//! - **Query filter** (`query`): search by name/order number/date, newest-first browse
//! - **Submission** (`submit`): validates entered data into an `InvoiceRecord`
//! - **Printing** (`printing`): A4 invoice PDF through `crab-pdf`
//! - **CLI** (`cli`): new / update / search / recent / pdf / platforms
//!
//! # Layout
//!
//! ```text
//! crab-invoice/src/
//! ├── core/          # configuration
//! ├── store/         # InvoiceStore trait, JSON file backend
//! ├── query.rs       # in-memory filters
//! ├── submit.rs      # draft validation
//! ├── printing/      # invoice renderer, PDF files
//! ├── cli/           # clap commands
//! └── utils/         # logging
//! ```

pub mod cli;
pub mod core;
pub mod printing;
pub mod query;
pub mod store;
pub mod submit;
pub mod utils;

// Re-export public types
pub use core::Config;
pub use printing::{InvoiceRenderer, RenderError, save_pdf};
pub use query::{browse, search};
pub use store::{InvoiceStore, JsonFileStore, StoreError, StoreResult};
pub use submit::{InvoiceDraft, ValidationError, submit};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// Start logging as configured; call once, after `.env` is loaded
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(store = %config.store_path.display(), "Environment ready");
    Ok(())
}
