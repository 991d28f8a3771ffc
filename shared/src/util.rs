//! Date/time text formats used by stored invoices

use chrono::{NaiveDate, NaiveDateTime};

/// `date` field format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `timestamp` field format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a calendar date as stored in `InvoiceRecord::date`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a creation time as stored in `InvoiceRecord::timestamp`
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "2024-03-09");

        let at = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-09 07:05:00");
    }
}
