//! Command line surface
//!
//! Argument definitions live here; [`commands`] runs them against the store.

pub mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{KNOWN_PLATFORMS, LineItem};

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "crab-invoice", about = "Record customer invoices and print them as PDF", version)]
pub struct Cli {
    /// Invoice file (overrides INVOICE_STORE)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// PDF output directory (overrides INVOICE_PDF_DIR)
    #[arg(long, global = true)]
    pub pdf_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new invoice and write its PDF
    New(InvoiceArgs),
    /// Replace the stored invoice with the same order number
    Update(InvoiceArgs),
    /// Filter by name or order number, optionally on one date
    Search {
        /// Substring of customer name or order number
        #[arg(default_value = "")]
        term: String,
        /// Only invoices dated YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List invoices newest first with full details
    Recent {
        /// Substring of name, order number or date
        #[arg(default_value = "")]
        term: String,
    },
    /// Regenerate the PDF of a stored invoice
    Pdf {
        order_number: String,
        /// Output directory (defaults to the configured PDF directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List known sales platforms
    Platforms,
}

#[derive(Debug, Clone, Args)]
pub struct InvoiceArgs {
    /// Invoice date (YYYY-MM-DD), today when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long, default_value = KNOWN_PLATFORMS[0])]
    pub platform: String,

    /// Customer name
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub order_number: String,

    #[arg(long, default_value = "")]
    pub contact: String,

    #[arg(long, default_value = "")]
    pub address: String,

    /// Amount paid in advance
    #[arg(long, default_value = "0")]
    pub advance: Decimal,

    /// Amount to collect on delivery
    #[arg(long, default_value = "0")]
    pub cod: Decimal,

    /// Line item as "product;imei;qty;price" (repeatable)
    #[arg(long = "item", value_name = "ITEM")]
    pub items: Vec<ItemArg>,

    /// Skip writing the PDF
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_pdf: bool,
}

/// One `--item` value
///
/// Fields after the product are optional: `imei` defaults to empty, `qty` to 1
/// and `price` to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemArg(pub LineItem);

impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';').map(str::trim);
        let product = parts.next().unwrap_or_default();
        let imei = parts.next().unwrap_or_default();

        let qty = match parts.next() {
            Some(q) if !q.is_empty() => q
                .parse::<u32>()
                .map_err(|e| format!("invalid qty '{}': {}", q, e))?,
            _ => 1,
        };
        let price = match parts.next() {
            Some(p) if !p.is_empty() => Decimal::from_str(p)
                .map_err(|e| format!("invalid price '{}': {}", p, e))?,
            _ => Decimal::ZERO,
        };
        if parts.next().is_some() {
            return Err(format!("expected product;imei;qty;price, got '{}'", s));
        }

        Ok(Self(LineItem::new(product, imei, qty, price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_full() {
        let item: ItemArg = "Phone; 356938035643809 ;2;100.50".parse().unwrap();
        assert_eq!(
            item.0,
            LineItem::new("Phone", "356938035643809", 2, Decimal::new(10050, 2))
        );
    }

    #[test]
    fn test_item_defaults() {
        let item: ItemArg = "Cable".parse().unwrap();
        assert_eq!(item.0, LineItem::new("Cable", "", 1, Decimal::ZERO));

        let item: ItemArg = "Cable;;;5".parse().unwrap();
        assert_eq!(item.0, LineItem::new("Cable", "", 1, Decimal::from(5)));
    }

    #[test]
    fn test_item_rejects_garbage() {
        assert!("Phone;;two;1".parse::<ItemArg>().is_err());
        assert!("Phone;;1;abc".parse::<ItemArg>().is_err());
        assert!("Phone;;1;1;extra".parse::<ItemArg>().is_err());
    }

    #[test]
    fn test_parse_new_command() {
        let cli = Cli::try_parse_from([
            "crab-invoice",
            "--store",
            "/tmp/inv.json",
            "new",
            "--name",
            "Ali",
            "--order-number",
            "1001",
            "--item",
            "Phone;3569;2;100",
            "--item",
            "Case",
        ])
        .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/inv.json")));
        let Command::New(args) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.platform, "Salamtec");
        assert_eq!(args.items.len(), 2);
        assert_eq!(args.advance, Decimal::ZERO);
        assert!(!args.no_pdf);
    }

    #[test]
    fn test_parse_search_date() {
        let cli = Cli::try_parse_from(["crab-invoice", "search", "--date", "2024-05-01"]).unwrap();
        let Command::Search { term, date } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(term, "");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
