//! Invoice renderer
//!
//! Lays out one InvoiceRecord as an A4 document:
//! details block, bordered item table, payment summary. Long product names
//! and IMEIs wrap inside their column; the row grows to fit.

use crab_pdf::{CellOpts, Document, DocumentBuilder, FontStyle, PageSetup, PdfResult, Rgb};
use shared::money::format_money;
use shared::{InvoiceRecord, LineItem};
use tracing::instrument;

/// Title printed at the top of every page
pub const INVOICE_TITLE: &str = "Customer Invoice";

/// Table header background
const HEADER_FILL: Rgb = Rgb(200, 220, 255);

/// Row height for every cell
const ROW_H: f32 = 10.0;

/// Table columns: (title, width mm)
const COLUMNS: [(&str, f32); 6] = [
    ("No", 10.0),
    ("Product", 60.0),
    ("IMEI", 40.0),
    ("Qty", 20.0),
    ("Price", 30.0),
    ("Total", 30.0),
];

/// Invoice document renderer
pub struct InvoiceRenderer {
    setup: PageSetup,
}

impl InvoiceRenderer {
    pub fn new() -> Self {
        Self {
            setup: PageSetup::a4().with_header(INVOICE_TITLE),
        }
    }

    /// Lay out an invoice without serializing it
    #[instrument(skip(self, invoice), fields(order_number = %invoice.order_number))]
    pub fn layout(&self, invoice: &InvoiceRecord) -> PdfResult<Document> {
        let title = format!("Invoice {}", invoice.order_number);
        let mut b = DocumentBuilder::new(title, self.setup.clone());
        b.add_page()?;
        b.set_font(FontStyle::Regular, 12.0);

        self.render_details(&mut b, invoice)?;
        self.render_table(&mut b, &invoice.products)?;
        self.render_summary(&mut b, invoice)?;

        b.finish()
    }

    /// Render an invoice to PDF bytes
    pub fn render(&self, invoice: &InvoiceRecord) -> PdfResult<Vec<u8>> {
        self.layout(invoice)?.to_pdf_bytes()
    }

    fn render_details(&self, b: &mut DocumentBuilder, invoice: &InvoiceRecord) -> PdfResult<()> {
        let fields = [
            ("Date", &invoice.date),
            ("Platform", &invoice.platform),
            ("Order #", &invoice.order_number),
            ("Customer Name", &invoice.name),
            ("Contact", &invoice.contact),
        ];
        for (label, value) in fields {
            b.cell(100.0, ROW_H, &format!("{}: {}", label, value), CellOpts::new().ln())?;
        }
        b.multi_cell(0.0, ROW_H, &format!("Address: {}", invoice.address), CellOpts::new())?;
        b.ln(5.0);
        Ok(())
    }

    fn render_table(&self, b: &mut DocumentBuilder, items: &[LineItem]) -> PdfResult<()> {
        b.set_fill_color(HEADER_FILL);
        b.set_font(FontStyle::Bold, 12.0);
        for (idx, (title, width)) in COLUMNS.iter().enumerate() {
            let mut opts = CellOpts::new().border().fill();
            if idx == COLUMNS.len() - 1 {
                opts = opts.ln();
            }
            b.cell(*width, ROW_H, title, opts)?;
        }

        b.set_font(FontStyle::Regular, 12.0);
        for (idx, item) in items.iter().enumerate() {
            let cells = [
                (idx + 1).to_string(),
                item.product.clone(),
                item.imei.clone(),
                item.qty.to_string(),
                format_money(item.price),
                format_money(item.line_total()),
            ];
            let row: Vec<(f32, &str)> = COLUMNS
                .iter()
                .zip(&cells)
                .map(|((_, width), text)| (*width, text.as_str()))
                .collect();
            b.row(&row, ROW_H, CellOpts::new().border().ln())?;
        }
        Ok(())
    }

    fn render_summary(&self, b: &mut DocumentBuilder, invoice: &InvoiceRecord) -> PdfResult<()> {
        b.ln(5.0);
        b.set_font(FontStyle::Bold, 12.0);

        let lines = [
            ("Advance Paid", invoice.advance),
            ("Cash on Delivery", invoice.cod),
            ("Total Amount", invoice.computed_total()),
        ];
        for (label, amount) in lines {
            let text = format!("{}: {}", label, format_money(amount));
            b.cell(100.0, ROW_H, &text, CellOpts::new().ln())?;
        }
        Ok(())
    }
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Download name for an invoice PDF, e.g. `invoice_1001.pdf`
///
/// Characters that are unsafe in file names become `_`.
pub fn pdf_file_name(invoice: &InvoiceRecord) -> String {
    let order: String = invoice
        .order_number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("invoice_{}.pdf", order)
}
