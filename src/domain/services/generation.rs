use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::models::{session::CourseSession, template::SessionTemplate};
use crate::domain::ports::{SessionRepository, TemplateRepository};
use crate::domain::services::conflict::{self, Classification};
use crate::domain::services::planner::{self, Decision, GenerationPlan};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub template_id: String,
    pub start_date: NaiveDate,
    pub total_meetings: u32,
}

#[derive(Debug, Serialize, Clone)]
pub struct SkippedCandidate {
    pub date: NaiveDate,
    pub conflicting_session_id: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerationResult {
    /// Empty for previews.
    pub created_session_ids: Vec<String>,
    pub planned_dates: Vec<NaiveDate>,
    pub skipped: Vec<SkippedCandidate>,
    pub total_created: usize,
    pub satisfied: bool,
}

/// One async mutex per course id, created on first use. Serializes the
/// read-plan-write sequence so two concurrent generations for the same
/// course cannot both observe a conflict-free calendar and both commit.
#[derive(Default)]
struct CourseLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl CourseLocks {
    fn for_course(&self, course_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(course_id.to_string()).or_default().clone()
    }
}

pub struct GenerationEngine {
    template_repo: Arc<dyn TemplateRepository>,
    session_repo: Arc<dyn SessionRepository>,
    locks: CourseLocks,
    max_meetings: u32,
}

impl GenerationEngine {
    pub fn new(
        template_repo: Arc<dyn TemplateRepository>,
        session_repo: Arc<dyn SessionRepository>,
        max_meetings: u32,
    ) -> Self {
        Self { template_repo, session_repo, locks: CourseLocks::default(), max_meetings }
    }

    /// Plans and commits in one call. The planned batch is written atomically;
    /// a storage failure leaves the course untouched and the whole call can be
    /// retried safely, since surviving sessions are detected as conflicts.
    pub async fn generate(
        &self,
        lecturer_id: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResult, AppError> {
        self.validate_count(request.total_meetings)?;
        let template = self.load_validated(lecturer_id, &request.template_id).await?;
        if template.weekdays()?.is_empty() {
            return Err(AppError::Validation("Template has no default days configured".into()));
        }

        let lock = self.locks.for_course(&template.course_id);
        let _guard = lock.lock().await;

        let existing = self.session_repo.list_by_course(&template.course_id).await?;
        let plan = planner::plan(&template, request.start_date, request.total_meetings as usize, &existing)?;

        let today = Utc::now().date_naive();
        let mut next_seq = existing.iter().map(|s| s.sequence_number).max().unwrap_or(0);

        let mut sessions = Vec::with_capacity(plan.created_count());
        for date in plan.create_dates() {
            next_seq += 1;
            sessions.push(CourseSession::from_template(&template, date, next_seq, today));
        }

        if !sessions.is_empty() {
            self.session_repo.create_batch(&sessions).await?;
        }

        info!(
            template_id = %template.id,
            course_id = %template.course_id,
            created = sessions.len(),
            satisfied = plan.satisfied,
            "generated sessions from template"
        );

        let created_session_ids = sessions.iter().map(|s| s.id.clone()).collect();
        Ok(summarize(&plan, created_session_ids))
    }

    /// Dry run: identical validation and planning, no writes.
    pub async fn preview(
        &self,
        lecturer_id: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResult, AppError> {
        self.validate_count(request.total_meetings)?;
        let template = self.load_validated(lecturer_id, &request.template_id).await?;
        if template.weekdays()?.is_empty() {
            return Err(AppError::Validation("Template has no default days configured".into()));
        }

        let existing = self.session_repo.list_by_course(&template.course_id).await?;
        let plan = planner::plan(&template, request.start_date, request.total_meetings as usize, &existing)?;

        Ok(summarize(&plan, Vec::new()))
    }

    /// One-off session at an explicit date, outside the recurring flow. Holds
    /// the same per-course lock as `generate`, so a concurrent generation or
    /// another one-off creation cannot double-book the slot.
    pub async fn create_single(
        &self,
        lecturer_id: &str,
        template_id: &str,
        date: NaiveDate,
        title: Option<String>,
    ) -> Result<CourseSession, AppError> {
        let template = self.load_validated(lecturer_id, template_id).await?;

        let lock = self.locks.for_course(&template.course_id);
        let _guard = lock.lock().await;

        let existing = self.session_repo.list_by_course(&template.course_id).await?;
        if let Classification::Conflict { session_id } =
            conflict::classify(date, template.window(), &existing)
        {
            return Err(AppError::Conflict(format!(
                "Session overlaps with existing session {}",
                session_id
            )));
        }

        let next_seq = existing.iter().map(|s| s.sequence_number).max().unwrap_or(0) + 1;
        let today = Utc::now().date_naive();

        let mut session = CourseSession::from_template(&template, date, next_seq, today);
        if let Some(title) = title {
            session.title = title;
        }

        self.session_repo.create_batch(std::slice::from_ref(&session)).await?;

        info!(
            session_id = %session.id,
            template_id = %template.id,
            course_id = %template.course_id,
            "created single session from template"
        );
        Ok(session)
    }

    fn validate_count(&self, total_meetings: u32) -> Result<(), AppError> {
        if total_meetings == 0 || total_meetings > self.max_meetings {
            return Err(AppError::Validation(format!(
                "Meeting count must be between 1 and {}",
                self.max_meetings
            )));
        }
        Ok(())
    }

    /// Shared validation gate: every failure here happens before any write.
    async fn load_validated(
        &self,
        lecturer_id: &str,
        template_id: &str,
    ) -> Result<SessionTemplate, AppError> {
        let template = self
            .template_repo
            .find_by_id(template_id)
            .await?
            .ok_or(AppError::NotFound("Template not found".into()))?;

        if template.lecturer_id != lecturer_id {
            return Err(AppError::Forbidden("Template belongs to another lecturer".into()));
        }
        if !template.is_active {
            return Err(AppError::Forbidden("Template is disabled".into()));
        }

        Ok(template)
    }
}

fn summarize(plan: &GenerationPlan, created_session_ids: Vec<String>) -> GenerationResult {
    let skipped = plan
        .entries
        .iter()
        .filter_map(|e| match &e.decision {
            Decision::Skip { conflicting_session_id } => Some(SkippedCandidate {
                date: e.date,
                conflicting_session_id: conflicting_session_id.clone(),
            }),
            Decision::Create => None,
        })
        .collect();

    GenerationResult {
        total_created: created_session_ids.len(),
        created_session_ids,
        planned_dates: plan.create_dates().collect(),
        skipped,
        satisfied: plan.satisfied,
    }
}
