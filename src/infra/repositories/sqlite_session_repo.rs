use crate::domain::{
    models::session::{CourseSession, SessionStatus},
    ports::SessionRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteSessionRepo {
    pool: SqlitePool,
}

impl SqliteSessionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<CourseSession>, AppError> {
        sqlx::query_as::<_, CourseSession>(
            "SELECT * FROM course_sessions WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<CourseSession>, AppError> {
        sqlx::query_as::<_, CourseSession>(
            "SELECT * FROM course_sessions WHERE course_id = ? ORDER BY date ASC, sequence_number ASC"
        )
            .bind(course_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_batch(&self, sessions: &[CourseSession]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        for session in sessions {
            sqlx::query(
                r#"INSERT INTO course_sessions (id, course_id, template_id, title, date, start_time, end_time, status, sequence_number, qr_token, created_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#
            )
                .bind(&session.id)
                .bind(&session.course_id)
                .bind(&session.template_id)
                .bind(&session.title)
                .bind(session.date)
                .bind(session.start_time)
                .bind(session.end_time)
                .bind(session.status)
                .bind(session.sequence_number)
                .bind(&session.qr_token)
                .bind(session.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: SessionStatus) -> Result<CourseSession, AppError> {
        sqlx::query_as::<_, CourseSession>(
            "UPDATE course_sessions SET status = ? WHERE id = ? RETURNING *"
        )
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Session not found".into()))
    }

    async fn activate_due(&self, today: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE course_sessions SET status = 'ACTIVE' WHERE status = 'SCHEDULED' AND date <= ?"
        )
            .bind(today)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }
}
