//! Text and JSON rendering of report tables.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use shiftlog_core::{DetailedReportRow, MonthlySummaryRow};

use crate::input::EventRow;

/// Display layout for session timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats minutes as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
/// Negative durations are treated as 0m.
pub fn format_duration(minutes: i64) -> String {
    if minutes < 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Width of the person column: the longest name, at least the header.
fn person_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        .max("PERSON".len())
}

/// Formats the normalized source events.
pub fn format_events(rows: &[EventRow]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        writeln!(output, "No events found.").unwrap();
        return output;
    }

    let width = person_width(rows.iter().map(|r| r.person_id.as_str()));
    writeln!(
        output,
        "{:<width$}  {:<19}  {:<5}  {:>5}",
        "PERSON", "TIMESTAMP", "EVENT", "MONTH"
    )
    .unwrap();

    for row in rows {
        writeln!(
            output,
            "{:<width$}  {}  {:<5}  {:>5}",
            row.person_id.as_str(),
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.event.as_str(),
            row.month,
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "{} events", rows.len()).unwrap();

    output
}

/// Formats the detailed session table.
pub fn format_sessions(rows: &[DetailedReportRow]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        writeln!(output, "No sessions found.").unwrap();
        return output;
    }

    let width = person_width(rows.iter().map(|r| r.person_id.as_str()));
    writeln!(
        output,
        "{:<width$}  {:<16}  {:<16}  {:>8}  {:<5}  {:>6}  {:>10}",
        "PERSON", "START", "END", "DURATION", "SHIFT", "BREAKS", "BREAK TIME"
    )
    .unwrap();

    for row in rows {
        writeln!(
            output,
            "{:<width$}  {}  {}  {:>8}  {:<5}  {:>6}  {:>10}",
            row.person_id.as_str(),
            row.start.format(TIMESTAMP_FORMAT),
            row.end.format(TIMESTAMP_FORMAT),
            format_duration(row.duration_minutes),
            row.shift.as_str(),
            row.break_count,
            format_duration(row.break_minutes),
        )
        .unwrap();
    }

    let errors = rows.iter().filter(|r| r.shift.is_error()).count();
    writeln!(output).unwrap();
    writeln!(output, "{} sessions ({errors} ERROR)", rows.len()).unwrap();

    output
}

/// Formats the monthly summary table.
pub fn format_summary(rows: &[MonthlySummaryRow]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        writeln!(output, "No summary rows.").unwrap();
        return output;
    }

    let width = person_width(rows.iter().map(|r| r.person_id.as_str()));
    writeln!(
        output,
        "{:<width$}  {:>5}  {:>4}  {:>6}  {:>9}  {:>10}",
        "PERSON", "MONTH", "DAYS", "BREAKS", "BREAK MIN", "MEAN BREAK"
    )
    .unwrap();

    for row in rows {
        writeln!(
            output,
            "{:<width$}  {:>5}  {:>4}  {:>6}  {:>9}  {:>10.2}",
            row.person_id.as_str(),
            row.month,
            row.days_worked,
            row.total_breaks,
            row.total_break_minutes,
            row.mean_break_minutes,
        )
        .unwrap();
    }

    output
}

/// Formats rows as a pretty-printed JSON array.
pub fn format_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
