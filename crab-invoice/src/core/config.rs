use std::path::PathBuf;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | INVOICE_STORE | data/invoices.json | Invoice file |
/// | INVOICE_PDF_DIR | . | Output directory for PDFs |
/// | LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (unset) | Enables rolling file logs |
///
/// # Example
///
/// ```ignore
/// INVOICE_STORE=/srv/shop/invoices.json LOG_DIR=/var/log/crab crab-invoice recent
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing JSON file of the record store
    pub store_path: PathBuf,
    /// Where generated invoice PDFs are written
    pub pdf_dir: PathBuf,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Emit console logs as JSON
    pub log_json: bool,
    /// Rolling log file directory; file logging is off when unset
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            store_path: std::env::var("INVOICE_STORE")
                .unwrap_or_else(|_| "data/invoices.json".into())
                .into(),
            pdf_dir: std::env::var("INVOICE_PDF_DIR")
                .unwrap_or_else(|_| ".".into())
                .into(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Override the store path (e.g. from a command line flag)
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store_path = path;
        }
        self
    }

    /// Override the PDF output directory
    pub fn with_pdf_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.pdf_dir = dir;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/invoices.json"),
            pdf_dir: PathBuf::from("."),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
