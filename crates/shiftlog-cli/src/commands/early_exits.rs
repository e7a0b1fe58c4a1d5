//! `shiftlog early-exits`: sessions ending just before the top of an hour.

use anyhow::Result;
use shiftlog_core::flag_early_exits;

use crate::commands::util::{filter_detailed, load_report};
use crate::render::{format_json, format_sessions};
use crate::{Config, ReportArgs};

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let report = load_report(args, config)?;
    let flagged = flag_early_exits(&report.detailed, config.session.early_exit_window());
    let rows = filter_detailed(flagged, args);
    tracing::debug!(
        flagged = rows.len(),
        window_minutes = config.session.early_exit_window_minutes,
        "flagged early exits"
    );

    if args.json {
        println!("{}", format_json(&rows)?);
    } else if rows.is_empty() {
        println!("No early exits found.");
    } else {
        print!("{}", format_sessions(&rows));
    }
    Ok(())
}
