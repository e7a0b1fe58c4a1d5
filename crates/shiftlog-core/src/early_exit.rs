//! Early-exit flagging.
//!
//! A session is an early exit when it ends in the last few minutes before the
//! top of an hour, e.g. 13:52 for a shift nominally ending at 14:00.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::report::DetailedReportRow;

/// Whether `end` falls in `[next_hour - window, next_hour)`.
///
/// `next_hour` is the hour boundary after `end` truncated to the hour.
/// Seconds are ignored, so 10:44:59 is outside a 15 minute window and 10:45:00
/// is inside; with any window under an hour the boundary itself (11:00) is
/// never flagged.
pub fn is_early_exit(end: NaiveDateTime, window: Duration) -> bool {
    let until_next_hour = Duration::minutes(60 - i64::from(end.minute()));

    until_next_hour <= window
}

/// Select the report rows whose session ended early.
pub fn flag_early_exits(rows: &[DetailedReportRow], window: Duration) -> Vec<DetailedReportRow> {
    rows.iter()
        .filter(|row| is_early_exit(row.end, window))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::ShiftLabel;
    use crate::types::PersonId;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .expect("valid test timestamp")
    }

    fn window() -> Duration {
        Duration::minutes(15)
    }

    #[test]
    fn flags_minutes_before_the_hour() {
        assert!(is_early_exit(at(10, 52, 0), window()));
        assert!(is_early_exit(at(13, 59, 59), window()));
    }

    #[test]
    fn does_not_flag_earlier_in_the_hour() {
        assert!(!is_early_exit(at(10, 40, 0), window()));
        assert!(!is_early_exit(at(10, 44, 59), window()));
    }

    #[test]
    fn lower_bound_is_inclusive() {
        assert!(is_early_exit(at(10, 45, 0), window()));
        assert!(is_early_exit(at(10, 45, 30), window()));
    }

    #[test]
    fn hour_boundary_is_not_flagged() {
        assert!(!is_early_exit(at(11, 0, 0), window()));
        assert!(!is_early_exit(at(0, 0, 0), window()));
    }

    #[test]
    fn late_evening_rolls_into_next_day() {
        assert!(is_early_exit(at(23, 50, 0), window()));
    }

    #[test]
    fn window_is_configurable() {
        assert!(!is_early_exit(at(10, 52, 0), Duration::minutes(5)));
        assert!(is_early_exit(at(10, 56, 0), Duration::minutes(5)));
    }

    #[test]
    fn oversized_window_flags_every_minute() {
        assert!(is_early_exit(at(10, 0, 0), Duration::MAX));
        assert!(is_early_exit(at(10, 1, 0), Duration::minutes(60)));
        assert!(!is_early_exit(at(10, 1, 0), Duration::MIN));
    }

    #[test]
    fn flag_early_exits_selects_matching_rows() {
        let row = |end: NaiveDateTime| DetailedReportRow {
            person_id: PersonId::new("Adam Kowalski").unwrap(),
            start: at(3, 0, 0),
            end,
            duration_minutes: (end - at(3, 0, 0)).num_minutes(),
            shift: ShiftLabel::EightHours,
            break_count: 0,
            break_minutes: 0,
            month: 3,
        };
        let rows = [row(at(10, 52, 0)), row(at(10, 40, 0)), row(at(11, 0, 0))];

        let flagged = flag_early_exits(&rows, window());
        assert_eq!(flagged, [rows[0].clone()]);
    }
}
