use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::template::{SessionTemplate, TimeWindow};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Legal transitions: Scheduled -> Active, Scheduled|Active -> Completed,
    /// Scheduled|Active -> Cancelled. Completed and Cancelled are terminal.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Scheduled, Active) | (Scheduled, Completed) | (Scheduled, Cancelled)
                | (Active, Completed) | (Active, Cancelled)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SessionStatus::Cancelled)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CourseSession {
    pub id: String,
    pub course_id: String,
    /// Provenance only. The template may be deleted or disabled later
    /// without affecting this session.
    pub template_id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub sequence_number: i64,
    pub qr_token: String,
    pub created_at: DateTime<Utc>,
}

impl CourseSession {
    /// Materializes one meeting from a template. The time window is copied,
    /// not referenced: later template edits leave this session untouched.
    pub fn from_template(
        template: &SessionTemplate,
        date: NaiveDate,
        sequence_number: i64,
        today: NaiveDate,
    ) -> Self {
        let status = if template.auto_activate && date == today {
            SessionStatus::Active
        } else {
            SessionStatus::Scheduled
        };

        let qr_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            course_id: template.course_id.clone(),
            template_id: Some(template.id.clone()),
            title: format!("Meeting {}", sequence_number),
            date,
            start_time: template.start_time,
            end_time: template.end_time,
            status,
            sequence_number,
            qr_token,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow { start: self.start_time, end: self.end_time }
    }
}
