use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::models::template::Weekdays;
use crate::error::AppError;

/// Lazy walk over candidate meeting dates: one calendar day at a time from
/// the start date (inclusive), emitting every date whose weekday is in the
/// set, until `target` dates have been produced. Month, year and leap-day
/// boundaries are handled by chrono's calendar arithmetic.
pub struct DateExpansion {
    weekdays: Weekdays,
    cursor: NaiveDate,
    remaining: usize,
    scan_budget: usize,
}

impl Iterator for DateExpansion {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while self.remaining > 0 && self.scan_budget > 0 {
            let date = self.cursor;
            self.cursor += Duration::days(1);
            self.scan_budget -= 1;

            if self.weekdays.contains(date.weekday()) {
                self.remaining -= 1;
                return Some(date);
            }
        }
        None
    }
}

/// Validates the pattern and returns the lazy expansion. A non-matching
/// start date is skipped, not an error: the first emitted date is the
/// nearest date >= `start` whose weekday is in the set.
pub fn expand(weekdays: Weekdays, start: NaiveDate, target: usize) -> Result<DateExpansion, AppError> {
    if weekdays.is_empty() {
        return Err(AppError::Validation("Template has no default days configured".into()));
    }
    if target == 0 {
        return Err(AppError::Validation("Meeting count must be positive".into()));
    }

    Ok(DateExpansion {
        weekdays,
        cursor: start,
        remaining: target,
        // A non-empty set matches at least once per week; this bound is
        // never hit in practice but guarantees termination.
        scan_budget: (target + 1) * 7,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(d: &[u8]) -> Weekdays {
        Weekdays::from_days(d).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_wednesday_from_a_monday() {
        // 2024-03-04 is a Monday.
        let dates: Vec<NaiveDate> = expand(days(&[1, 3]), date(2024, 3, 4), 4).unwrap().collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 3, 4),
                date(2024, 3, 6),
                date(2024, 3, 11),
                date(2024, 3, 13),
            ]
        );
    }

    #[test]
    fn test_non_matching_start_skips_forward() {
        // 2024-03-05 is a Tuesday; the next Mon/Wed is Wednesday the 6th.
        let dates: Vec<NaiveDate> = expand(days(&[1, 3]), date(2024, 3, 5), 2).unwrap().collect();
        assert_eq!(dates, vec![date(2024, 3, 6), date(2024, 3, 11)]);
    }

    #[test]
    fn test_emits_exactly_target_strictly_increasing() {
        let dates: Vec<NaiveDate> = expand(days(&[0, 2, 5]), date(2023, 12, 25), 20).unwrap().collect();
        assert_eq!(dates.len(), 20);
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        let wd = days(&[0, 2, 5]);
        for d in &dates {
            assert!(wd.contains(d.weekday()));
        }
    }

    #[test]
    fn test_crosses_leap_day() {
        // 2024-02-29 is a Thursday.
        let dates: Vec<NaiveDate> = expand(days(&[4]), date(2024, 2, 22), 3).unwrap().collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 22), date(2024, 2, 29), date(2024, 3, 7)]
        );
    }

    #[test]
    fn test_crosses_year_boundary() {
        // 2024-12-30 is a Monday, the following Monday is 2025-01-06.
        let dates: Vec<NaiveDate> = expand(days(&[1]), date(2024, 12, 30), 2).unwrap().collect();
        assert_eq!(dates, vec![date(2024, 12, 30), date(2025, 1, 6)]);
    }

    #[test]
    fn test_empty_weekday_set_rejected() {
        assert!(expand(Weekdays::default(), date(2024, 3, 4), 4).is_err());
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(expand(days(&[1]), date(2024, 3, 4), 0).is_err());
    }

    #[test]
    fn test_prefix_can_be_taken_lazily() {
        let mut iter = expand(days(&[1, 3]), date(2024, 3, 4), 100).unwrap();
        assert_eq!(iter.next(), Some(date(2024, 3, 4)));
        assert_eq!(iter.next(), Some(date(2024, 3, 6)));
        // The rest is never materialized.
    }
}
