//! Command handlers
//!
//! Output goes to the supplied writer; logs go to stderr through tracing.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use shared::money::format_money;
use shared::{InvoiceRecord, KNOWN_PLATFORMS};

use super::{Command, InvoiceArgs};
use crate::audit_log;
use crate::core::Config;
use crate::printing::save_pdf;
use crate::query::{browse, search};
use crate::store::{InvoiceStore, JsonFileStore};
use crate::submit::{InvoiceDraft, submit};

/// Exit code for a rejected submission
const EXIT_REJECTED: u8 = 2;

/// Run one command against the configured store
pub fn run(command: Command, config: &Config, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let store = JsonFileStore::new(&config.store_path);
    let now = Local::now().naive_local();

    match command {
        Command::New(args) => handle_new(&store, config, args, now, out),
        Command::Update(args) => handle_update(&store, config, args, now, out),
        Command::Search { term, date } => {
            let all = store.load_all().context("failed to load invoices")?;
            let found = search(&all, &term, date);
            writeln!(out, "Total Results: {}", found.len())?;
            for inv in found {
                write_summary_line(out, inv)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Recent { term } => {
            let all = store.load_all().context("failed to load invoices")?;
            let found = browse(&all, &term);
            writeln!(out, "Total Results: {}", found.len())?;
            for inv in found {
                write_details(out, inv)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Pdf { order_number, out: dir } => {
            let Some(inv) = store
                .find_by_key(&order_number)
                .context("failed to load invoices")?
            else {
                writeln!(out, "No invoice with order number {}", order_number)?;
                return Ok(ExitCode::FAILURE);
            };
            let dir = dir.as_deref().unwrap_or(config.pdf_dir.as_path());
            let path = save_pdf(&inv, dir).context("failed to write invoice PDF")?;
            writeln!(out, "PDF: {}", path.display())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Platforms => {
            for platform in KNOWN_PLATFORMS {
                writeln!(out, "{}", platform)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn draft_from(args: InvoiceArgs, now: NaiveDateTime) -> InvoiceDraft {
    InvoiceDraft {
        date: args.date.unwrap_or(now.date()),
        platform: args.platform,
        name: args.name,
        order_number: args.order_number,
        contact: args.contact,
        address: args.address,
        advance: args.advance,
        cod: args.cod,
        items: args.items.into_iter().map(|item| item.0).collect(),
    }
}

fn handle_new(
    store: &impl InvoiceStore,
    config: &Config,
    args: InvoiceArgs,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let no_pdf = args.no_pdf;
    let record = match submit(draft_from(args, now), now) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "Invoice rejected");
            writeln!(out, "Warning: {}", e)?;
            return Ok(ExitCode::from(EXIT_REJECTED));
        }
    };

    store.append(&record).context("failed to save invoice")?;
    let resource = format!("invoice:{}", record.order_number);
    let details = format!("total {}", format_money(record.total));
    audit_log!("create", resource.as_str(), details.as_str());
    writeln!(
        out,
        "Invoice saved: order {} total {}",
        record.order_number,
        format_money(record.total)
    )?;

    write_pdf(&record, &config.pdf_dir, no_pdf, out)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_update(
    store: &impl InvoiceStore,
    config: &Config,
    args: InvoiceArgs,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let no_pdf = args.no_pdf;
    let mut record = match submit(draft_from(args, now), now) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "Invoice update rejected");
            writeln!(out, "Warning: {}", e)?;
            return Ok(ExitCode::from(EXIT_REJECTED));
        }
    };

    // Keep the stored creation time
    if let Some(existing) = store
        .find_by_key(&record.order_number)
        .context("failed to load invoices")?
    {
        record.timestamp = existing.timestamp;
    }

    if !store.update_by_key(&record).context("failed to update invoice")? {
        writeln!(
            out,
            "No invoice with order number {}, nothing updated",
            record.order_number
        )?;
        return Ok(ExitCode::SUCCESS);
    }

    let resource = format!("invoice:{}", record.order_number);
    let details = format!("total {}", format_money(record.total));
    audit_log!("update", resource.as_str(), details.as_str());
    writeln!(
        out,
        "Invoice updated: order {} total {}",
        record.order_number,
        format_money(record.total)
    )?;

    write_pdf(&record, &config.pdf_dir, no_pdf, out)?;
    Ok(ExitCode::SUCCESS)
}

fn write_pdf(
    record: &InvoiceRecord,
    dir: &Path,
    skip: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if skip {
        return Ok(());
    }
    let path = save_pdf(record, dir).context("failed to write invoice PDF")?;
    writeln!(out, "PDF: {}", path.display())?;
    Ok(())
}

fn write_summary_line(out: &mut impl Write, inv: &InvoiceRecord) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {}  {}  {}  {}",
        inv.date,
        inv.order_number,
        inv.name,
        inv.platform,
        format_money(inv.total)
    )
}

fn write_details(out: &mut impl Write, inv: &InvoiceRecord) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} - {} ({})", inv.order_number, inv.name, inv.date)?;
    writeln!(out, "  Date/Time: {}", inv.timestamp)?;
    writeln!(out, "  Platform:  {}", inv.platform)?;
    writeln!(out, "  Contact:   {}", inv.contact)?;
    writeln!(out, "  Address:   {}", inv.address)?;
    writeln!(
        out,
        "  Advance: {} | COD: {}",
        format_money(inv.advance),
        format_money(inv.cod)
    )?;
    writeln!(out, "  Total: {}", format_money(inv.total))?;
    for (idx, item) in inv.products.iter().enumerate() {
        writeln!(
            out,
            "    {}. {}  {}  x{}  @ {}",
            idx + 1,
            item.product,
            item.imei,
            item.qty,
            format_money(item.price)
        )?;
    }
    Ok(())
}
