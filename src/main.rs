//! Custodian CLI - compliance tracking for CMMC 2.0 programs
//!
//! Usage: custodian <COMMAND>
//!
//! Commands:
//!   report         Generate a compliance report
//!   stats          Print every domain's statistics
//!   backup         Write a full backup
//!   restore        Replace all data from a backup
//!   import-assets  Import assets with validation
//!   export         Export a collection as CSV
//!   reset          Clear all data

use clap::Parser;
use tracing_subscriber::EnvFilter;

use custodian::cli::Cli;
use custodian::commands;

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("custodian={}", default)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
