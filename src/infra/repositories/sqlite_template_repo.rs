use crate::domain::{models::template::SessionTemplate, ports::TemplateRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTemplateRepo {
    pool: SqlitePool,
}

impl SqliteTemplateRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepo {
    async fn create(&self, template: &SessionTemplate) -> Result<SessionTemplate, AppError> {
        sqlx::query_as::<_, SessionTemplate>(
            r#"INSERT INTO session_templates (id, lecturer_id, course_id, name, description, start_time, end_time, default_days, auto_activate, is_active, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&template.id)
            .bind(&template.lecturer_id)
            .bind(&template.course_id)
            .bind(&template.name)
            .bind(&template.description)
            .bind(template.start_time)
            .bind(template.end_time)
            .bind(&template.default_days)
            .bind(template.auto_activate)
            .bind(template.is_active)
            .bind(template.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SessionTemplate>, AppError> {
        sqlx::query_as::<_, SessionTemplate>(
            "SELECT * FROM session_templates WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_lecturer(&self, lecturer_id: &str) -> Result<Vec<SessionTemplate>, AppError> {
        sqlx::query_as::<_, SessionTemplate>(
            "SELECT * FROM session_templates WHERE lecturer_id = ? ORDER BY created_at DESC"
        )
            .bind(lecturer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, template: &SessionTemplate) -> Result<SessionTemplate, AppError> {
        sqlx::query_as::<_, SessionTemplate>(
            r#"UPDATE session_templates
               SET name=?, description=?, start_time=?, end_time=?, default_days=?, auto_activate=?, is_active=?
               WHERE id=? RETURNING *"#
        )
            .bind(&template.name)
            .bind(&template.description)
            .bind(template.start_time)
            .bind(template.end_time)
            .bind(&template.default_days)
            .bind(template.auto_activate)
            .bind(template.is_active)
            .bind(&template.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM session_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Template not found".into()));
        }
        Ok(())
    }
}
