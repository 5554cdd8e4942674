use crate::domain::models::{
    session::{CourseSession, SessionStatus},
    template::SessionTemplate,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &SessionTemplate) -> Result<SessionTemplate, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<SessionTemplate>, AppError>;
    async fn list_by_lecturer(&self, lecturer_id: &str) -> Result<Vec<SessionTemplate>, AppError>;
    async fn update(&self, template: &SessionTemplate) -> Result<SessionTemplate, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<CourseSession>, AppError>;
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<CourseSession>, AppError>;
    /// All-or-nothing: on error no session from the batch is persisted.
    async fn create_batch(&self, sessions: &[CourseSession]) -> Result<(), AppError>;
    async fn update_status(&self, id: &str, status: SessionStatus) -> Result<CourseSession, AppError>;
    /// Promotes SCHEDULED sessions dated on or before `today` to ACTIVE,
    /// catching up sessions whose date elapsed while the service was down.
    /// Returns the number of rows touched.
    async fn activate_due(&self, today: NaiveDate) -> Result<u64, AppError>;
}
