//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::InputFormat;

/// Shift reports from badge-reader logs.
///
/// Reconstructs work sessions from entry/exit swipes, classifies them into
/// nominal shifts and summarizes breaks per person and month.
#[derive(Debug, Parser)]
#[command(name = "shiftlog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List badge events after normalization and filtering.
    Events(ReportArgs),

    /// List reconstructed work sessions.
    Sessions(ReportArgs),

    /// Summarize sessions per person and month.
    Summary(ReportArgs),

    /// List sessions that ended shortly before the top of an hour.
    EarlyExits(ReportArgs),

    /// Print the effective configuration.
    Config,
}

/// Input and filter options shared by the report commands.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Badge log to read. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Input format. Inferred from the file extension, defaults to jsonl.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Only show rows for this person.
    #[arg(long)]
    pub person: Option<String>,

    /// Only show rows for this month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
