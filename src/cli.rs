//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;

/// Turn OCR lines from betting screens into match records
#[derive(Debug, Parser)]
#[command(name = "oddsboard", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config_dir>/oddsboard/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store file, overriding the config
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse capture files and write accepted records to the store
    Parse(ParseArgs),
    /// Show the category of each line of a capture file
    Classify(ClassifyArgs),
    /// Remove duplicate matches from the store
    Dedupe(DedupeArgs),
    /// Print store statistics
    Stats(StatsArgs),
    /// Remove every row from the store
    Clear,
}

/// Arguments for `parse`
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Capture files: one OCR line per line, blank lines between captures
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Use an in-memory store instead of the configured one
    #[arg(long)]
    pub dry_run: bool,

    /// Print each accepted record as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip matches whose teams are already in the store
    #[arg(long)]
    pub skip_persisted: bool,

    /// The store has no header row; none is written into an empty store
    #[arg(long)]
    pub no_header: bool,

    /// Odds a record needs before it is written
    #[arg(long, value_name = "N")]
    pub min_odds: Option<usize>,

    /// Odds column count
    #[arg(long, value_name = "N")]
    pub odds_columns: Option<usize>,
}

/// Arguments for `classify`
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Capture file
    pub input: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `dedupe`
#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// Fingerprint columns 0, 1 and 2 as league, date and teams
    /// instead of the record layout (teams in column 0)
    #[arg(long)]
    pub positional: bool,

    /// Report duplicates without rewriting the store
    #[arg(long)]
    pub check: bool,

    /// List the sheet rows (header is row 1) holding this match instead of cleaning
    #[arg(long, value_name = "TEAMS", conflicts_with = "check")]
    pub find: Option<String>,

    /// Only list rows with this date (needs --positional)
    #[arg(long, value_name = "DATE", requires = "find")]
    pub date: Option<String>,
}

/// Arguments for `stats`
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Overrides carried by the command line
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::new();
        overrides.store_path = self.store.clone();

        if let Commands::Parse(args) = &self.command {
            overrides.odds_columns = args.odds_columns;
            overrides.persist_min_odds = args.min_odds;
            if args.skip_persisted {
                overrides.skip_persisted = Some(true);
            }
            if args.no_header {
                overrides.write_header = Some(false);
                overrides.has_header = Some(false);
            }
        }

        overrides
    }
}
