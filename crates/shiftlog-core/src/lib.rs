//! Core domain logic for badge-log shift reconstruction.
//!
//! This crate contains the fundamental types and logic for:
//! - Timelines: grouping raw badge records into per-person event sequences
//! - Session extraction: turning an event sequence into work sessions
//! - Shift classification: bucketing session lengths into nominal shifts
//! - Reports: detailed per-session rows, monthly summaries and early exits
//!
//! Nothing here performs I/O; parsing and presentation live in `shiftlog-cli`.

pub mod early_exit;
pub mod event;
pub mod report;
pub mod session;
pub mod shift;
pub mod timeline;
pub mod types;

pub use early_exit::{flag_early_exits, is_early_exit};
pub use event::{Event, EventKind, UnknownEventKind};
pub use report::{DetailedReportRow, MonthlySummaryRow, Report, build_report, summarize};
pub use session::{Session, SessionConfig, extract_sessions};
pub use shift::{ShiftLabel, classify_shift};
pub use timeline::{BadgeRecord, TimelineError, Timelines, group_events};
pub use types::{PersonId, ValidationError};
