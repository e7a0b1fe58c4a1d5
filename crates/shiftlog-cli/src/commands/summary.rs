//! `shiftlog summary`: per-person monthly totals.

use anyhow::Result;

use crate::commands::util::{filter_summary, load_report};
use crate::render::{format_json, format_summary};
use crate::{Config, ReportArgs};

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let report = load_report(args, config)?;
    let rows = filter_summary(report.summary, args);

    if args.json {
        println!("{}", format_json(&rows)?);
    } else {
        print!("{}", format_summary(&rows));
    }
    Ok(())
}
