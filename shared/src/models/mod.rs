//! Data models
//!
//! Persisted as one JSON array in the invoice store file.

pub mod invoice;
pub mod legacy;

// Re-exports
pub use invoice::*;
pub use legacy::StoredInvoice;
