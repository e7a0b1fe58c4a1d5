//! `shiftlog sessions`: the detailed per-session report.

use anyhow::Result;

use crate::commands::util::{filter_detailed, load_report};
use crate::render::{format_json, format_sessions};
use crate::{Config, ReportArgs};

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let report = load_report(args, config)?;
    let rows = filter_detailed(report.detailed, args);

    if args.json {
        println!("{}", format_json(&rows)?);
    } else {
        print!("{}", format_sessions(&rows));
    }
    Ok(())
}
