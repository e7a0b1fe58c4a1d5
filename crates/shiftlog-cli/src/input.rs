//! Raw badge-log parsing.
//!
//! Turns CSV or JSON Lines rows into `BadgeRecord`s sorted by person and
//! time, ready for `shiftlog_core::group_events`.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shiftlog_core::{BadgeRecord, EventKind, PersonId};

use crate::config::FilterConfig;

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON object per line.
    Jsonl,
}

impl InputFormat {
    /// Infers the format from a file extension; anything but `.csv` is jsonl.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path.and_then(Path::extension).and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Jsonl,
        }
    }
}

/// Timestamp layouts accepted besides RFC 3339.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a reader timestamp as wall-clock time.
///
/// RFC 3339 offsets are dropped; the local time as written is kept.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .with_context(|| format!("invalid timestamp: {s}"))
}

/// A row as exported by the badge reader.
///
/// Field aliases match the column headers of the turnstile controller export.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "Data")]
    timestamp: String,
    #[serde(alias = "Zdarzenie")]
    event: String,
    #[serde(default, alias = "Imię i Nazwisko")]
    person: Option<String>,
    #[serde(default, alias = "Imię")]
    first_name: Option<String>,
    #[serde(default, alias = "Nazwisko")]
    last_name: Option<String>,
    #[serde(default, alias = "Urządzenie")]
    device: Option<String>,
    #[serde(default, alias = "Weryfikacja")]
    verification: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl RawRow {
    /// Full name: `person` if present, else first and last name joined.
    fn person_name(&self) -> Option<String> {
        if let Some(person) = non_empty(self.person.as_deref()) {
            return Some(person.to_string());
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_empty)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Converts the row, or returns `None` if the filter drops it.
    fn into_record(self, filter: &FilterConfig) -> Result<Option<BadgeRecord>> {
        if !filter.accepts(self.device.as_deref(), self.verification.as_deref()) {
            return Ok(None);
        }
        let person = self
            .person_name()
            .ok_or_else(|| anyhow::anyhow!("missing person name"))?;
        if filter.excludes(&person, self.last_name.as_deref()) {
            return Ok(None);
        }
        let kind: EventKind = self.event.parse()?;
        let timestamp = parse_timestamp(&self.timestamp)?;
        Ok(Some(BadgeRecord {
            person: PersonId::new(person)?,
            timestamp,
            kind,
        }))
    }
}

/// A normalized source row as listed by `shiftlog events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub person_id: PersonId,
    pub timestamp: NaiveDateTime,
    pub event: EventKind,
    /// Calendar month of `timestamp`, 1-12.
    pub month: u32,
}

impl From<BadgeRecord> for EventRow {
    fn from(record: BadgeRecord) -> Self {
        Self {
            month: record.timestamp.month(),
            person_id: record.person,
            timestamp: record.timestamp,
            event: record.kind,
        }
    }
}

/// Read every row from `reader`, drop filtered rows and sort the rest by
/// person then timestamp.
///
/// Sorting is stable, so swipes sharing a timestamp keep their file order.
pub fn read_records<R: Read>(
    reader: R,
    format: InputFormat,
    filter: &FilterConfig,
) -> Result<Vec<BadgeRecord>> {
    let (mut records, skipped) = match format {
        InputFormat::Csv => read_csv(reader, filter)?,
        InputFormat::Jsonl => read_jsonl(BufReader::new(reader), filter)?,
    };
    tracing::debug!(
        kept = records.len(),
        skipped,
        ?format,
        "parsed badge log"
    );

    records.sort_by(|a, b| {
        a.person
            .cmp(&b.person)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });
    Ok(records)
}

/// Byte order mark some exporters prepend to UTF-8 files.
const BOM: char = '\u{feff}';

fn read_jsonl<R: BufRead>(reader: R, filter: &FilterConfig) -> Result<(Vec<BadgeRecord>, usize)> {
    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let line = if idx == 0 {
            line.strip_prefix(BOM).unwrap_or(&line)
        } else {
            &line
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let row: RawRow = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        match row
            .into_record(filter)
            .with_context(|| format!("invalid event on line {}", idx + 1))?
        {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    Ok((records, skipped))
}

fn read_csv<R: Read>(reader: R, filter: &FilterConfig) -> Result<(Vec<BadgeRecord>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = 0;
    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        // Row 1 is the header.
        let row_number = idx + 2;
        let row = row.with_context(|| format!("invalid CSV on row {row_number}"))?;
        match row
            .into_record(filter)
            .with_context(|| format!("invalid event on row {row_number}"))?
        {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    Ok((records, skipped))
}
