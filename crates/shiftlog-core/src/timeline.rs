//! Per-person event timelines built from flat badge records.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::event::{Event, EventKind};
use crate::types::PersonId;

/// One normalized badge-log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeRecord {
    pub person: PersonId,
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

/// Errors raised while grouping records into timelines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A person's events went backwards in time.
    #[error("events for {person} out of order at record {index}: {timestamp} before {previous}")]
    OutOfOrder {
        person: PersonId,
        /// Zero-based position of the offending record in the input.
        index: usize,
        previous: NaiveDateTime,
        timestamp: NaiveDateTime,
    },
}

/// Chronological events keyed by person, iterated in person order.
pub type Timelines = BTreeMap<PersonId, Vec<Event>>;

/// Group records into per-person timelines.
///
/// Records for different people may interleave, but each person's records
/// must already be in non-decreasing timestamp order. The first record that
/// breaks this fails the whole batch rather than yielding wrong sessions.
pub fn group_events<I>(records: I) -> Result<Timelines, TimelineError>
where
    I: IntoIterator<Item = BadgeRecord>,
{
    let mut timelines = Timelines::new();

    for (index, record) in records.into_iter().enumerate() {
        let event = Event {
            timestamp: record.timestamp,
            kind: record.kind,
        };

        if let Some(events) = timelines.get_mut(&record.person) {
            if let Some(previous) = events.last() {
                if record.timestamp < previous.timestamp {
                    return Err(TimelineError::OutOfOrder {
                        person: record.person,
                        index,
                        previous: previous.timestamp,
                        timestamp: record.timestamp,
                    });
                }
            }
            events.push(event);
        } else {
            timelines.insert(record.person, vec![event]);
        }
    }

    tracing::debug!(person_count = timelines.len(), "grouped badge records");
    Ok(timelines)
}
