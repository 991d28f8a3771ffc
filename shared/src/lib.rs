//! Shared types for Crab Invoice
//!
//! Invoice record model, on-disk migration and money helpers used by the
//! store, the renderer and the command line.

pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use models::{InvoiceRecord, KNOWN_PLATFORMS, LineItem, StoredInvoice};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
