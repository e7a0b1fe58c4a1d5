//! Shared utilities for report commands.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use shiftlog_core::{
    BadgeRecord, DetailedReportRow, MonthlySummaryRow, Report, build_report, group_events,
};

use crate::input::{self, EventRow, InputFormat};
use crate::{Config, ReportArgs};

/// Open the input file, or stdin for `None` and `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Read the badge log named by `args`, filtered and sorted.
pub fn load_records(args: &ReportArgs, config: &Config) -> Result<Vec<BadgeRecord>> {
    let path = args.input.as_deref().filter(|p| *p != Path::new("-"));
    let format = args
        .format
        .unwrap_or_else(|| InputFormat::from_path(path));

    let reader = open_input(path)?;
    input::read_records(reader, format, &config.filter)
}

/// Read the badge log named by `args` and build the full report.
pub fn load_report(args: &ReportArgs, config: &Config) -> Result<Report> {
    let records = load_records(args, config)?;
    let timelines = group_events(records).context("badge log is not in chronological order")?;

    Ok(build_report(&timelines, &config.session))
}

fn matches(args: &ReportArgs, person: &str, month: u32) -> bool {
    args.person.as_deref().is_none_or(|p| p.trim() == person)
        && args.month.is_none_or(|m| m == month)
}

/// Keep source events matching the `--person` / `--month` filters.
pub fn filter_events(rows: Vec<EventRow>, args: &ReportArgs) -> Vec<EventRow> {
    rows.into_iter()
        .filter(|row| matches(args, row.person_id.as_str(), row.month))
        .collect()
}

/// Keep detailed rows matching the `--person` / `--month` filters.
pub fn filter_detailed(rows: Vec<DetailedReportRow>, args: &ReportArgs) -> Vec<DetailedReportRow> {
    rows.into_iter()
        .filter(|row| matches(args, row.person_id.as_str(), row.month))
        .collect()
}

/// Keep summary rows matching the `--person` / `--month` filters.
pub fn filter_summary(rows: Vec<MonthlySummaryRow>, args: &ReportArgs) -> Vec<MonthlySummaryRow> {
    rows.into_iter()
        .filter(|row| matches(args, row.person_id.as_str(), row.month))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn args(input: Option<&Path>) -> ReportArgs {
        ReportArgs {
            input: input.map(Path::to_path_buf),
            format: None,
            person: None,
            month: None,
            json: false,
        }
    }

    #[test]
    fn load_report_infers_csv_from_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "timestamp,person,event\n\
             2025-03-03 06:00,Adam Kowalski,entry\n\
             2025-03-03 14:00,Adam Kowalski,exit\n"
        )
        .unwrap();

        let report = load_report(&args(Some(file.path())), &Config::default()).unwrap();
        assert_eq!(report.detailed.len(), 1);
        assert_eq!(report.summary.len(), 1);
    }

    #[test]
    fn load_report_reports_missing_file() {
        let err = load_report(&args(Some(Path::new("/nonexistent/log.csv"))), &Config::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to open /nonexistent/log.csv"));
    }

    #[test]
    fn filters_match_person_and_month() {
        let mut filtered = args(None);
        filtered.person = Some("Adam Kowalski".to_string());
        filtered.month = Some(3);

        assert!(matches(&filtered, "Adam Kowalski", 3));
        assert!(!matches(&filtered, "Adam Kowalski", 4));
        assert!(!matches(&filtered, "Ewa Lis", 3));
        assert!(matches(&args(None), "Ewa Lis", 12));
    }
}
