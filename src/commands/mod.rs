//! CLI command dispatch
//!
//! Thin consumers of the public core API; all real behavior lives in
//! the library.

mod data;
mod report;

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::runtime::ComplianceCore;

pub fn run(cli: Cli) -> Result<()> {
    let core = open_core(&cli)?;
    match cli.command {
        Commands::Report {
            title,
            description,
            generated_by,
            window_days,
        } => report::generate(&core, &title, &description, &generated_by, window_days),
        Commands::Stats => report::stats(&core),
        Commands::Backup { out } => data::backup(&core, out.as_deref()),
        Commands::Restore { file } => data::restore(&core, &file),
        Commands::ImportAssets { file } => data::import_assets(&core, &file),
        Commands::Export { domain } => data::export(&core, domain),
        Commands::Reset { keep_profile, yes } => data::reset(&core, keep_profile, yes),
    }
}

fn open_core(cli: &Cli) -> Result<ComplianceCore> {
    if let Some(dir) = &cli.data_dir {
        return Ok(ComplianceCore::open(dir));
    }

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    match config.data_dir {
        Some(dir) => Ok(ComplianceCore::open(dir)),
        None => Ok(ComplianceCore::open_default()?),
    }
}
