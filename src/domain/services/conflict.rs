use chrono::NaiveDate;

use crate::domain::models::{session::CourseSession, template::TimeWindow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Usable,
    Conflict { session_id: String },
}

/// Pure check of a candidate slot against a course's existing sessions.
/// A candidate conflicts with any non-cancelled session on the same date
/// whose time window intersects it. Cancelled sessions never block.
pub fn classify(date: NaiveDate, window: TimeWindow, existing: &[CourseSession]) -> Classification {
    for session in existing {
        if session.status.is_cancelled() {
            continue;
        }
        if session.date == date && window.overlaps(&session.window()) {
            return Classification::Conflict { session_id: session.id.clone() };
        }
    }
    Classification::Usable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::session::SessionStatus;
    use chrono::{NaiveTime, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow::new(t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    fn session(id: &str, date: NaiveDate, w: TimeWindow, status: SessionStatus) -> CourseSession {
        CourseSession {
            id: id.into(),
            course_id: "course-1".into(),
            template_id: None,
            title: "Meeting 1".into(),
            date,
            start_time: w.start,
            end_time: w.end,
            status,
            sequence_number: 1,
            qr_token: "tok".into(),
            created_at: Utc::now(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_same_date_overlapping_window_conflicts() {
        let existing = vec![session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Scheduled)];
        let got = classify(date(6), window((9, 0), (11, 0)), &existing);
        assert_eq!(got, Classification::Conflict { session_id: "s1".into() });
    }

    #[test]
    fn test_identical_window_conflicts() {
        let existing = vec![session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Active)];
        let got = classify(date(6), window((8, 0), (10, 0)), &existing);
        assert_eq!(got, Classification::Conflict { session_id: "s1".into() });
    }

    #[test]
    fn test_different_date_is_usable() {
        let existing = vec![session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Scheduled)];
        assert_eq!(classify(date(7), window((8, 0), (10, 0)), &existing), Classification::Usable);
    }

    #[test]
    fn test_touching_windows_are_usable() {
        let existing = vec![session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Scheduled)];
        assert_eq!(classify(date(6), window((10, 0), (12, 0)), &existing), Classification::Usable);
        assert_eq!(classify(date(6), window((6, 0), (8, 0)), &existing), Classification::Usable);
    }

    #[test]
    fn test_cancelled_sessions_never_block() {
        let existing = vec![session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Cancelled)];
        assert_eq!(classify(date(6), window((8, 0), (10, 0)), &existing), Classification::Usable);
    }

    #[test]
    fn test_first_conflicting_session_reported() {
        let existing = vec![
            session("s1", date(6), window((8, 0), (10, 0)), SessionStatus::Completed),
            session("s2", date(6), window((9, 0), (11, 0)), SessionStatus::Scheduled),
        ];
        let got = classify(date(6), window((9, 30), (10, 30)), &existing);
        assert_eq!(got, Classification::Conflict { session_id: "s1".into() });
    }
}
