use std::process::ExitCode;

use clap::Parser;
use crab_invoice::cli::{Cli, run};
use crab_invoice::{Config, setup_environment};

fn main() -> anyhow::Result<ExitCode> {
    // .env before reading any configuration
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()
        .with_store_path(cli.store)
        .with_pdf_dir(cli.pdf_dir);

    setup_environment(&config)?;

    let mut stdout = std::io::stdout().lock();
    let code = run(cli.command, &config, &mut stdout)?;
    Ok(code)
}
