//! Invoice Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// Sales platforms offered by the entry form.
///
/// `platform` is free text in practice; this list only feeds help output.
pub const KNOWN_PLATFORMS: &[&str] = &[
    "Salamtec",
    "Alfamall",
    "Digimall",
    "Meezan Bank",
    "Faisal Takmeel",
    "Daraz",
    "Js Bank",
    "Bank al Falah",
];

pub(crate) fn default_qty() -> u32 {
    1
}

/// One product row within an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
    /// Unit price in currency unit
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(product: impl Into<String>, imei: impl Into<String>, qty: u32, price: Decimal) -> Self {
        Self {
            product: product.into(),
            imei: imei.into(),
            qty,
            price,
        }
    }

    /// price × qty
    pub fn line_total(&self) -> Decimal {
        money::line_total(self.price, self.qty)
    }
}

/// One saved invoice
///
/// `order_number` is the natural key. Nothing enforces its uniqueness.
/// `total` is a snapshot taken at save time and is not recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub platform: String,
    pub name: String,
    pub order_number: String,
    pub contact: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub advance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cod: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub products: Vec<LineItem>,
}

impl InvoiceRecord {
    /// Σ price × qty over the current line items
    ///
    /// Unlike `total`, this always reflects `products`.
    pub fn computed_total(&self) -> Decimal {
        money::invoice_total(&self.products)
    }
}
