//! On-disk invoice shape, including the pre-`products` layout
//!
//! Early files stored one product per invoice as top-level
//! `product`/`imei`/`qty`/`price` fields. [`StoredInvoice`] accepts both
//! layouts; [`StoredInvoice::into_record`] folds the old one into a
//! single-element `products` list.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::invoice::{InvoiceRecord, LineItem, default_qty};
use crate::money;

/// Invoice as found in the backing file
#[derive(Debug, Clone, Deserialize)]
pub struct StoredInvoice {
    pub date: String,
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
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub products: Option<Vec<LineItem>>,

    // Single-product layout
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub imei: Option<String>,
    #[serde(default)]
    pub qty: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl StoredInvoice {
    /// True when the entry predates the `products` list
    pub fn is_legacy(&self) -> bool {
        self.products.is_none()
    }

    /// Upgrade to the current record shape
    ///
    /// A stored `total` is kept as is; it is only derived when absent.
    pub fn into_record(self) -> InvoiceRecord {
        let products = match self.products {
            Some(products) => products,
            None => vec![LineItem {
                product: self.product.unwrap_or_default(),
                imei: self.imei.unwrap_or_default(),
                qty: self.qty.unwrap_or_else(default_qty),
                price: self.price.unwrap_or_default(),
            }],
        };
        let total = self
            .total
            .unwrap_or_else(|| money::invoice_total(&products));

        InvoiceRecord {
            date: self.date,
            timestamp: self.timestamp,
            platform: self.platform,
            name: self.name,
            order_number: self.order_number,
            contact: self.contact,
            address: self.address,
            advance: self.advance,
            cod: self.cod,
            total,
            products,
        }
    }
}
