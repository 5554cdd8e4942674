use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (outer None) from an explicit null
/// (Some(None)), so optional text fields can be cleared.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Deserialize)]
pub struct CreateTemplateRequest {
    pub course_id: String,
    pub name: String,
    pub description: Option<String>,
    /// "HH:MM"
    pub start_time: String,
    pub end_time: String,
    /// Weekday indices, 0=Sunday .. 6=Saturday.
    pub default_days: Vec<u8>,
    pub auto_activate: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub default_days: Option<Vec<u8>>,
    pub auto_activate: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct GenerateSessionsRequest {
    pub start_date: NaiveDate,
    pub total_meetings: u32,
}

#[derive(Deserialize)]
pub struct CreateSessionFromTemplateRequest {
    pub date: NaiveDate,
    pub title: Option<String>,
}
