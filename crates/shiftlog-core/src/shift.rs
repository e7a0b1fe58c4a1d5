//! Nominal shift classification.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Nominal shift length assigned to a session, or `Error` when the session is
/// longer than any shift plus tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftLabel {
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "ERROR")]
    Error,
}

/// Nominal shifts in tie-break order.
const NOMINAL_SHIFTS: [ShiftLabel; 3] = [
    ShiftLabel::FourHours,
    ShiftLabel::EightHours,
    ShiftLabel::TwelveHours,
];

impl ShiftLabel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FourHours => "4h",
            Self::EightHours => "8h",
            Self::TwelveHours => "12h",
            Self::Error => "ERROR",
        }
    }

    /// Length of the nominal shift in hours; `None` for `Error`.
    #[must_use]
    pub const fn nominal_hours(&self) -> Option<i64> {
        match self {
            Self::FourHours => Some(4),
            Self::EightHours => Some(8),
            Self::TwelveHours => Some(12),
            Self::Error => None,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of the longest nominal shift.
pub fn longest_shift() -> Duration {
    Duration::hours(12)
}

/// Classify a session duration into a nominal shift.
///
/// Durations above `max_span` are `Error`. Otherwise the nominal shift with
/// the smallest absolute difference wins; on a tie the shorter shift wins, so
/// exactly 6h is `4h` and exactly 10h is `8h`.
pub fn classify_shift(duration: Duration, max_span: Duration) -> ShiftLabel {
    if duration > max_span {
        return ShiftLabel::Error;
    }

    // min_by_key keeps the first of equal minima
    NOMINAL_SHIFTS
        .into_iter()
        .filter_map(|label| label.nominal_hours().map(|h| (label, Duration::hours(h))))
        .min_by_key(|(_, nominal)| (duration - *nominal).abs())
        .map_or(ShiftLabel::Error, |(label, _)| label)
}
