//! Work session extraction.
//!
//! Turns one person's chronologically ordered badge events into discrete work
//! sessions with break statistics and a nominal shift label.
//!
//! # Algorithm Summary
//!
//! The scan keeps two cursors into the event slice and alternates between two
//! states:
//!
//! 1. *Seeking start*: skip to the next Entry, which becomes the session start.
//!    Entries within the coalesce margin of that start are duplicate swipes and
//!    are absorbed.
//! 2. *Accumulating*: walk forward until an Exit is directly followed by an
//!    Entry at least the break-gap threshold later. That Entry is left
//!    unconsumed and starts the next session.
//!
//! The accumulated window becomes a session ending at its last Exit. A window
//! with no Exit is an unterminated session and is dropped.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::shift::{ShiftLabel, classify_shift, longest_shift};
use crate::types::ValidationError;

/// Tunable thresholds for session extraction and early-exit flagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Consecutive Entries within this margin of the session start are
    /// treated as one clock-in.
    /// Default: 20.
    pub entry_coalesce_margin_minutes: i64,

    /// An Exit followed by an Entry at least this far apart ends the session
    /// instead of counting as a break.
    /// Default: 480 (8 hours).
    pub break_gap_threshold_minutes: i64,

    /// Allowed overrun past the longest nominal shift before a session is
    /// labelled `ERROR`.
    /// Default: 50.
    pub shift_tolerance_minutes: i64,

    /// Sessions ending within this many minutes before the top of an hour are
    /// flagged as early exits.
    /// Default: 15.
    pub early_exit_window_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            entry_coalesce_margin_minutes: 20,
            break_gap_threshold_minutes: 8 * 60,
            shift_tolerance_minutes: 50,
            early_exit_window_minutes: 15,
        }
    }
}

impl SessionConfig {
    pub fn entry_coalesce_margin(&self) -> Duration {
        saturating_minutes(self.entry_coalesce_margin_minutes)
    }

    pub fn break_gap_threshold(&self) -> Duration {
        saturating_minutes(self.break_gap_threshold_minutes)
    }

    /// Longest session that still receives a nominal shift label.
    pub fn max_session_span(&self) -> Duration {
        longest_shift()
            .checked_add(&saturating_minutes(self.shift_tolerance_minutes))
            .unwrap_or(Duration::MAX)
    }

    pub fn early_exit_window(&self) -> Duration {
        saturating_minutes(self.early_exit_window_minutes)
    }

    /// Checks that every threshold is within a usable range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        const DAY_MINUTES: i64 = 24 * 60;

        let checks = [
            (
                "entry_coalesce_margin_minutes",
                self.entry_coalesce_margin_minutes,
                0,
                DAY_MINUTES,
            ),
            (
                "break_gap_threshold_minutes",
                self.break_gap_threshold_minutes,
                1,
                7 * DAY_MINUTES,
            ),
            (
                "shift_tolerance_minutes",
                self.shift_tolerance_minutes,
                0,
                DAY_MINUTES,
            ),
            (
                "early_exit_window_minutes",
                self.early_exit_window_minutes,
                1,
                60,
            ),
        ];

        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// One reconstructed continuous work period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// First Entry of the session.
    pub start: NaiveDateTime,
    /// Last Exit of the session.
    pub end: NaiveDateTime,
    pub duration: Duration,
    pub shift: ShiftLabel,
    /// Number of Exit→Entry pairs inside the session.
    pub break_count: u32,
    pub total_break: Duration,
}

impl Session {
    /// Whole minutes between start and end, truncated.
    pub fn duration_minutes(&self) -> i64 {
        self.duration.num_minutes()
    }

    /// Whole minutes spent on breaks, truncated.
    pub fn break_minutes(&self) -> i64 {
        self.total_break.num_minutes()
    }
}

/// Minutes as a `Duration`, clamped to the representable range.
///
/// Out-of-range values from an unvalidated config behave as "never" or
/// "always".
fn saturating_minutes(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or(if minutes < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

/// Extract sessions from one person's events.
///
/// Events must be sorted by timestamp ascending; `timeline::group_events`
/// guarantees this for grouped input. Runs in a single pass, O(n).
pub fn extract_sessions(events: &[Event], config: &SessionConfig) -> Vec<Session> {
    let margin = config.entry_coalesce_margin();
    let gap_threshold = config.break_gap_threshold();
    let max_span = config.max_session_span();

    let mut sessions = Vec::new();
    let n = events.len();
    let mut i = 0;

    while i < n {
        if !events[i].is_entry() {
            i += 1;
            continue;
        }

        let start = events[i].timestamp;
        let mut j = i + 1;
        while j < n && events[j].is_entry() && events[j].timestamp - start <= margin {
            j += 1;
        }

        let mut k = j;
        while k < n && !ends_session(&events[k - 1], &events[k], gap_threshold) {
            k += 1;
        }

        let window = &events[i..k];
        if let Some(session) = build_session(window, max_span) {
            sessions.push(session);
        } else {
            tracing::debug!(
                %start,
                event_count = window.len(),
                "dropping unterminated session"
            );
        }

        i = k;
    }

    sessions
}

/// Whether the gap between two adjacent events closes the current session.
fn ends_session(previous: &Event, next: &Event, gap_threshold: Duration) -> bool {
    previous.is_exit() && next.is_entry() && next.timestamp - previous.timestamp >= gap_threshold
}

/// Build a session from an accumulated window, or `None` if it has no Exit.
fn build_session(window: &[Event], max_span: Duration) -> Option<Session> {
    let start = window.first()?.timestamp;
    let end = window.iter().rev().find(|e| e.is_exit())?.timestamp;

    let (break_count, total_break) = window
        .windows(2)
        .filter(|pair| pair[0].is_exit() && pair[1].is_entry())
        .fold((0, Duration::zero()), |(count, total), pair| {
            (count + 1, total + (pair[1].timestamp - pair[0].timestamp))
        });

    let duration = end - start;
    Some(Session {
        start,
        end,
        duration,
        shift: classify_shift(duration, max_span),
        break_count,
        total_break,
    })
}
