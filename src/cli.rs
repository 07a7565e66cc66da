use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Custodian - compliance tracking core for CMMC 2.0 programs
#[derive(Parser, Debug)]
#[command(name = "custodian")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory override (defaults to config, then platform dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Collection to export as CSV
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportDomain {
    Controls,
    Policies,
    Evidence,
    Calendar,
    Reports,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a compliance report and print it as JSON
    Report {
        /// Report title
        #[arg(long, default_value = "Compliance Report")]
        title: String,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,

        /// Who requested the report
        #[arg(long, default_value = "custodian-cli")]
        generated_by: String,

        /// Days of history the report covers
        #[arg(long, default_value_t = 90)]
        window_days: u32,
    },

    /// Print every domain's statistics as JSON
    Stats,

    /// Write a full backup to a file (or stdout)
    Backup {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace all data from a backup file
    Restore {
        /// Backup file produced by `custodian backup`
        file: PathBuf,
    },

    /// Import assets from a JSON file with per-record validation
    ImportAssets {
        /// JSON array of assets, or an object with an "assets" array
        file: PathBuf,
    },

    /// Export a collection as CSV to stdout
    Export {
        /// Which collection to export
        #[arg(value_enum)]
        domain: ExportDomain,
    },

    /// Clear all data
    Reset {
        /// Keep settings and the operator profile
        #[arg(long)]
        keep_profile: bool,

        /// Skip the confirmation guard
        #[arg(short, long)]
        yes: bool,
    },
}
