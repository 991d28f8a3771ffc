//! Invoice submission
//!
//! Turns what the user entered into a complete [`InvoiceRecord`]. Nothing is
//! written here; a rejected draft never reaches the store.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use shared::util::{format_date, format_timestamp};
use shared::{InvoiceRecord, LineItem, money};
use thiserror::Error;

/// Submission rejected before any store mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one product with a name")]
    NoProducts,

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("quantity must be at least 1 for '{product}'")]
    InvalidQuantity { product: String },
}

/// Candidate invoice as entered
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub date: NaiveDate,
    pub platform: String,
    pub name: String,
    pub order_number: String,
    pub contact: String,
    pub address: String,
    pub advance: Decimal,
    pub cod: Decimal,
    /// Rows as entered; rows with a blank product are dropped
    pub items: Vec<LineItem>,
}

fn require_non_negative(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Keep rows that name a product, trimmed
fn named_items(items: Vec<LineItem>) -> Result<Vec<LineItem>, ValidationError> {
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let product = item.product.trim();
        if product.is_empty() {
            continue;
        }
        if item.qty == 0 {
            return Err(ValidationError::InvalidQuantity {
                product: product.to_string(),
            });
        }
        require_non_negative(item.price, "price")?;

        kept.push(LineItem {
            product: product.to_string(),
            imei: item.imei.trim().to_string(),
            qty: item.qty,
            price: item.price,
        });
    }

    if kept.is_empty() {
        return Err(ValidationError::NoProducts);
    }
    Ok(kept)
}

/// Validate a draft and build the record to save
///
/// `now` becomes the record's creation timestamp; `total` is derived from
/// the kept line items.
pub fn submit(draft: InvoiceDraft, now: NaiveDateTime) -> Result<InvoiceRecord, ValidationError> {
    require_non_negative(draft.advance, "advance")?;
    require_non_negative(draft.cod, "cod")?;
    let products = named_items(draft.items)?;
    let total = money::invoice_total(&products);

    if draft.order_number.trim().is_empty() {
        tracing::warn!("Invoice submitted without an order number");
    }

    Ok(InvoiceRecord {
        date: format_date(draft.date),
        timestamp: format_timestamp(now),
        platform: draft.platform,
        name: draft.name,
        order_number: draft.order_number,
        contact: draft.contact,
        address: draft.address,
        advance: draft.advance,
        cod: draft.cod,
        total,
        products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    fn draft(items: Vec<LineItem>) -> InvoiceDraft {
        InvoiceDraft {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            platform: "Daraz".to_string(),
            name: "Ali".to_string(),
            order_number: "1001".to_string(),
            contact: "0300".to_string(),
            address: "Karachi".to_string(),
            advance: Decimal::ZERO,
            cod: Decimal::ZERO,
            items,
        }
    }

    #[test]
    fn test_total_is_derived() {
        let record = submit(
            draft(vec![
                LineItem::new("Charger", "", 2, Decimal::from(10)),
                LineItem::new("Cable", "", 1, Decimal::from(5)),
            ]),
            now(),
        )
        .unwrap();
        assert_eq!(record.total, Decimal::new(250, 1));
    }

    #[test]
    fn test_stamps_date_and_timestamp() {
        let record = submit(draft(vec![LineItem::new("Phone", "", 1, Decimal::ONE)]), now()).unwrap();
        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.timestamp, "2024-05-01 14:30:05");
    }

    #[test]
    fn test_blank_rows_dropped_and_trimmed() {
        let record = submit(
            draft(vec![
                LineItem::new("   ", "123", 1, Decimal::from(99)),
                LineItem::new("  Phone ", " 3569 ", 1, Decimal::from(100)),
                LineItem::new("", "", 1, Decimal::ZERO),
            ]),
            now(),
        )
        .unwrap();
        assert_eq!(
            record.products,
            vec![LineItem::new("Phone", "3569", 1, Decimal::from(100))]
        );
        assert_eq!(record.total, Decimal::from(100));
    }

    #[test]
    fn test_all_blank_rejected() {
        let err = submit(
            draft(vec![
                LineItem::new("", "", 1, Decimal::from(5)),
                LineItem::new("  ", "", 2, Decimal::from(5)),
            ]),
            now(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NoProducts);
    }

    #[test]
    fn test_no_rows_rejected() {
        assert_eq!(
            submit(draft(vec![]), now()).unwrap_err(),
            ValidationError::NoProducts
        );
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut d = draft(vec![LineItem::new("Phone", "", 1, Decimal::ONE)]);
        d.advance = Decimal::from(-1);
        assert!(matches!(
            submit(d, now()),
            Err(ValidationError::NegativeAmount { .. })
        ));

        let d = draft(vec![LineItem::new("Phone", "", 1, Decimal::from(-3))]);
        assert!(matches!(
            submit(d, now()),
            Err(ValidationError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let d = draft(vec![LineItem::new("Phone", "", 0, Decimal::ONE)]);
        assert_eq!(
            submit(d, now()).unwrap_err(),
            ValidationError::InvalidQuantity {
                product: "Phone".to_string()
            }
        );
    }
}
