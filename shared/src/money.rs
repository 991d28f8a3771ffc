//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are kept as `Decimal` end to end and only rounded for display.

use rust_decimal::prelude::*;

use crate::models::LineItem;

/// Display precision (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// price × qty for one line
#[inline]
pub fn line_total(price: Decimal, qty: u32) -> Decimal {
    price * Decimal::from(qty)
}

/// Σ price × qty over all lines
pub fn invoice_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(|item| line_total(item.price, item.qty))
        .sum()
}

/// Round to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with exactly two decimals, e.g. `200.00`
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_total() {
        let items = vec![
            LineItem::new("A", "", 2, Decimal::from(10)),
            LineItem::new("B", "", 1, Decimal::from(5)),
        ];
        assert_eq!(invoice_total(&items), Decimal::from(25));
        assert_eq!(invoice_total(&items).to_f64(), Some(25.0));
    }

    #[test]
    fn test_invoice_total_empty() {
        assert_eq!(invoice_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_precision() {
        // 0.1 × 3 stays exact
        let total = line_total(Decimal::new(1, 1), 3);
        assert_eq!(total, Decimal::new(3, 1));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from(200)), "200.00");
        assert_eq!(format_money(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_money(Decimal::new(5, 1)), "0.50");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }
}
