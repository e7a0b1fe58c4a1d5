//! Detailed session report and monthly summary.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use rayon::prelude::*;
use serde::Serialize;

use crate::session::{Session, SessionConfig, extract_sessions};
use crate::shift::ShiftLabel;
use crate::timeline::Timelines;
use crate::types::PersonId;

/// One row per reconstructed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedReportRow {
    pub person_id: PersonId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub shift: ShiftLabel,
    pub break_count: u32,
    pub break_minutes: i64,
    /// Calendar month of `start`, 1-12.
    pub month: u32,
}

impl DetailedReportRow {
    fn from_session(person_id: &PersonId, session: &Session) -> Self {
        Self {
            person_id: person_id.clone(),
            start: session.start,
            end: session.end,
            duration_minutes: session.duration_minutes(),
            shift: session.shift,
            break_count: session.break_count,
            break_minutes: session.break_minutes(),
            month: session.start.month(),
        }
    }
}

/// Per-person, per-month aggregate over non-`ERROR` sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummaryRow {
    pub person_id: PersonId,
    pub month: u32,
    pub days_worked: u32,
    pub total_breaks: u32,
    pub total_break_minutes: i64,
    /// Mean break minutes per session, rounded half away from zero to two
    /// decimal places.
    pub mean_break_minutes: f64,
}

/// Output of the report builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Sorted by person, then session start.
    pub detailed: Vec<DetailedReportRow>,
    /// Sorted by person, then month.
    pub summary: Vec<MonthlySummaryRow>,
}

/// Build the detailed report and monthly summary for every person.
///
/// Each person is processed independently on the rayon pool; the output is
/// identical to a sequential run.
pub fn build_report(timelines: &Timelines, config: &SessionConfig) -> Report {
    let mut detailed: Vec<DetailedReportRow> = timelines
        .par_iter()
        .flat_map_iter(|(person_id, events)| {
            extract_sessions(events, config)
                .into_iter()
                .map(move |session| DetailedReportRow::from_session(person_id, &session))
        })
        .collect();

    detailed.sort_by(|a, b| {
        a.person_id
            .cmp(&b.person_id)
            .then_with(|| a.start.cmp(&b.start))
    });

    let summary = summarize(&detailed);

    tracing::debug!(
        person_count = timelines.len(),
        session_count = detailed.len(),
        summary_rows = summary.len(),
        "built report"
    );

    Report { detailed, summary }
}

#[derive(Debug, Default)]
struct MonthTotals {
    days_worked: u32,
    total_breaks: u32,
    total_break_minutes: i64,
}

/// Aggregate detailed rows by person and month, skipping `ERROR` sessions.
pub fn summarize(detailed: &[DetailedReportRow]) -> Vec<MonthlySummaryRow> {
    let mut groups: BTreeMap<(&PersonId, u32), MonthTotals> = BTreeMap::new();

    for row in detailed.iter().filter(|row| !row.shift.is_error()) {
        let totals = groups.entry((&row.person_id, row.month)).or_default();
        totals.days_worked += 1;
        totals.total_breaks += row.break_count;
        totals.total_break_minutes += row.break_minutes;
    }

    groups
        .into_iter()
        .map(|((person_id, month), totals)| MonthlySummaryRow {
            person_id: person_id.clone(),
            month,
            days_worked: totals.days_worked,
            total_breaks: totals.total_breaks,
            total_break_minutes: totals.total_break_minutes,
            mean_break_minutes: rounded_mean(totals.total_break_minutes, totals.days_worked),
        })
        .collect()
}

/// Mean of `total / count` rounded half away from zero to two decimals.
///
/// Rounds on exact integer hundredths: 0.125 becomes 0.13.
#[allow(clippy::cast_precision_loss)]
fn rounded_mean(total: i64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = i64::from(count);
    let doubled = total * 200;
    let hundredths = if doubled >= 0 {
        (doubled + count) / (2 * count)
    } else {
        (doubled - count) / (2 * count)
    };
    hundredths as f64 / 100.0
}
