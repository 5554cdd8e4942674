use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Wall-clock window a session occupies within a single day.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, AppError> {
        if end <= start {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        Ok(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open intersection: touching windows (end == other start) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Set of weekdays a template recurs on, 0=Sunday .. 6=Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Weekdays(u8);

impl Weekdays {
    pub fn from_days(days: &[u8]) -> Result<Self, AppError> {
        let mut mask = 0u8;
        for &d in days {
            if d > 6 {
                return Err(AppError::Validation(format!("Invalid weekday index: {}", d)));
            }
            mask |= 1 << d;
        }
        Ok(Self(mask))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday() as u8) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Sorted, deduplicated day indices for storage and display.
    pub fn to_days(&self) -> Vec<u8> {
        (0..7).filter(|d| self.0 & (1 << d) != 0).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SessionTemplate {
    pub id: String,
    pub lecturer_id: String,
    pub course_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// JSON array of weekday indices, e.g. "[1,3]" for Monday and Wednesday.
    pub default_days: String,
    pub auto_activate: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewTemplateParams {
    pub lecturer_id: String,
    pub course_id: String,
    pub name: String,
    pub description: Option<String>,
    pub window: TimeWindow,
    pub weekdays: Weekdays,
    pub auto_activate: bool,
}

impl SessionTemplate {
    pub fn new(params: NewTemplateParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lecturer_id: params.lecturer_id,
            course_id: params.course_id,
            name: params.name,
            description: params.description,
            start_time: params.window.start,
            end_time: params.window.end,
            default_days: serde_json::to_string(&params.weekdays.to_days())
                .unwrap_or_else(|_| "[]".to_string()),
            auto_activate: params.auto_activate,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow { start: self.start_time, end: self.end_time }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.window().duration_minutes()
    }

    pub fn weekdays(&self) -> Result<Weekdays, AppError> {
        let days: Vec<u8> = serde_json::from_str(&self.default_days)
            .map_err(|_| AppError::Validation("Template has a malformed weekday set".into()))?;
        Weekdays::from_days(&days)
    }
}
