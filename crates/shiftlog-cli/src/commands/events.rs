//! `shiftlog events`: the normalized source rows behind every report.

use anyhow::Result;

use crate::commands::util::{filter_events, load_records};
use crate::input::EventRow;
use crate::render::{format_events, format_json};
use crate::{Config, ReportArgs};

pub fn run(args: &ReportArgs, config: &Config) -> Result<()> {
    let records = load_records(args, config)?;
    let rows = filter_events(records.into_iter().map(EventRow::from).collect(), args);

    if args.json {
        println!("{}", format_json(&rows)?);
    } else {
        print!("{}", format_events(&rows));
    }
    Ok(())
}
