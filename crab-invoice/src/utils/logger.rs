//! Logging Infrastructure
//!
//! Console logs go to stderr so command output on stdout stays clean.
//! With a log directory configured:
//! - Daily rotating application logs under `app/` (deleted after 14 days)
//! - Daily rotating audit logs under `audit/` (never deleted)

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, filter::filter_fn, fmt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type Subscriber = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Subscriber> + Send + Sync>;

/// Delete `app-YYYY-MM-DD.log` files dated before `cutoff`
///
/// Returns how many files were removed. Audit logs are never touched.
pub fn cleanup_logs_before(log_dir: &Path, cutoff: NaiveDate) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name
            .strip_prefix("app.")
            .or_else(|| name.strip_prefix("app-"))
            .map(|d| d.strip_suffix(".log").unwrap_or(d))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Clean up application log files older than 14 days
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    cleanup_logs_before(log_dir, cutoff)
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    }
}

/// One daily rolling file layer receiving only events `accept`ed by target
fn file_layer(
    dir: &Path,
    prefix: &str,
    json_format: bool,
    accept: fn(&str) -> bool,
) -> anyhow::Result<BoxedLayer> {
    let dir = dir.join(prefix);
    fs::create_dir_all(&dir)?;

    let writer = std::sync::Mutex::new(RollingFileAppender::new(Rotation::DAILY, dir, prefix));
    let filter = filter_fn(move |meta| accept(meta.target()));

    let layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    };
    Ok(layer)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level used when `RUST_LOG` is unset (e.g. "info", "debug")
/// * `json_format` - JSON output instead of human readable lines
/// * `log_dir` - Optional directory for rolling file logs
///
/// # Examples
/// ```ignore
/// // Console only
/// init_logger_with_file("debug", false, None)?;
///
/// // Console + files
/// init_logger_with_file("info", true, Some(Path::new("./logs")))?;
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers = vec![console_layer(json_format)];
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        layers.push(file_layer(dir, "app", json_format, |target| target != "audit")?);
        layers.push(file_layer(dir, "audit", json_format, |target| target == "audit")?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    if let Some(dir) = log_dir
        && let Err(e) = cleanup_old_logs(dir)
    {
        tracing::error!(error = %e, "Failed to cleanup old logs");
    }

    Ok(())
}

/// Audit log helper - records changes to the invoice file
///
/// Audit entries go to `audit/` and are never deleted by cleanup.
///
/// # Examples
/// ```ignore
/// audit_log!("create", "invoice:1001");
/// audit_log!("update", "invoice:1001", "total 200.00");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = $resource,
            details = $details,
            timestamp = chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}
