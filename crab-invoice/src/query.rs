//! In-memory invoice filters
//!
//! Plain linear scans over the loaded list. Fine for a shop's worth of
//! invoices; there is no index to keep in sync with the file.

use chrono::NaiveDate;
use shared::InvoiceRecord;
use shared::util::format_date;

/// Case-insensitive substring match on name or order number
///
/// An empty `term` matches every record. When `date` is given, a record must
/// also carry exactly that date. Input order is preserved.
pub fn search<'a>(
    records: &'a [InvoiceRecord],
    term: &str,
    date: Option<NaiveDate>,
) -> Vec<&'a InvoiceRecord> {
    let term = term.to_lowercase();
    let date = date.map(format_date);

    records
        .iter()
        .filter(|inv| {
            inv.name.to_lowercase().contains(&term)
                || inv.order_number.to_lowercase().contains(&term)
        })
        .filter(|inv| date.as_ref().is_none_or(|d| inv.date == *d))
        .collect()
}

/// Recent-invoices listing: name, order number or date contains `term`
///
/// Newest first (reverse insertion order).
pub fn browse<'a>(records: &'a [InvoiceRecord], term: &str) -> Vec<&'a InvoiceRecord> {
    let term = term.to_lowercase();

    records
        .iter()
        .rev()
        .filter(|inv| {
            inv.name.to_lowercase().contains(&term)
                || inv.order_number.to_lowercase().contains(&term)
                || inv.date.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Decimal, LineItem};

    fn record(order_number: &str, name: &str, date: &str) -> InvoiceRecord {
        InvoiceRecord {
            date: date.to_string(),
            timestamp: format!("{} 09:00:00", date),
            platform: "Daraz".to_string(),
            name: name.to_string(),
            order_number: order_number.to_string(),
            contact: String::new(),
            address: String::new(),
            advance: Decimal::ZERO,
            cod: Decimal::ZERO,
            total: Decimal::from(10),
            products: vec![LineItem::new("Case", "", 1, Decimal::from(10))],
        }
    }

    fn records() -> Vec<InvoiceRecord> {
        vec![
            record("A-100", "Ali Khan", "2024-05-01"),
            record("B-200", "Sara", "2024-05-02"),
            record("C-300", "Kalim", "2024-05-01"),
            record("D-ALI", "Usman", "2024-05-03"),
        ]
    }

    fn orders(found: &[&InvoiceRecord]) -> Vec<String> {
        found.iter().map(|r| r.order_number.clone()).collect()
    }

    #[test]
    fn test_empty_term_returns_all_in_order() {
        let all = records();
        assert_eq!(
            orders(&search(&all, "", None)),
            vec!["A-100", "B-200", "C-300", "D-ALI"]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let all = records();
        let upper = search(&all, "ALI", None);
        let lower = search(&all, "ali", None);
        assert_eq!(upper, lower);
        // "Ali Khan", "Kalim" by name, "D-ALI" by order number
        assert_eq!(orders(&upper), vec!["A-100", "C-300", "D-ALI"]);
    }

    #[test]
    fn test_order_number_match() {
        let all = records();
        assert_eq!(orders(&search(&all, "b-2", None)), vec!["B-200"]);
    }

    #[test]
    fn test_date_filter() {
        let all = records();
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(orders(&search(&all, "ali", may_first)), vec!["A-100", "C-300"]);
        // Date-only search
        assert_eq!(orders(&search(&all, "", may_first)), vec!["A-100", "C-300"]);
    }

    #[test]
    fn test_date_does_not_rescue_term_miss() {
        let all = records();
        let may_second = NaiveDate::from_ymd_opt(2024, 5, 2);
        assert!(search(&all, "ali", may_second).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let all = records();
        assert!(search(&all, "zzz", None).is_empty());
    }

    #[test]
    fn test_browse_newest_first() {
        let all = records();
        assert_eq!(
            orders(&browse(&all, "")),
            vec!["D-ALI", "C-300", "B-200", "A-100"]
        );
    }

    #[test]
    fn test_browse_matches_date() {
        let all = records();
        assert_eq!(orders(&browse(&all, "05-01")), vec!["C-300", "A-100"]);
        assert_eq!(orders(&browse(&all, "SARA")), vec!["B-200"]);
    }
}
