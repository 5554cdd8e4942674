use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::CreateSessionFromTemplateRequest;
use crate::api::extractors::lecturer::LecturerId;
use crate::domain::models::session::{CourseSession, SessionStatus};
use crate::error::AppError;
use crate::state::AppState;

/// One-off session at an explicit date, outside the recurring generation
/// flow. The engine conflict-checks it under the per-course lock.
pub async fn create_session_from_template(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Path(template_id): Path<String>,
    Json(payload): Json<CreateSessionFromTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .generation_engine
        .create_single(&lecturer_id, &template_id, payload.date, payload.title)
        .await?;

    Ok(Json(session))
}

pub async fn list_course_sessions(
    State(state): State<Arc<AppState>>,
    LecturerId(_lecturer_id): LecturerId,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_by_course(&course_id).await?;
    Ok(Json(sessions))
}

async fn transition(
    state: &AppState,
    session_id: &str,
    next: SessionStatus,
) -> Result<CourseSession, AppError> {
    let session = state
        .session_repo
        .find_by_id(session_id)
        .await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if !session.status.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "Illegal status transition: {:?} -> {:?}",
            session.status, next
        )));
    }

    state.session_repo.update_status(session_id, next).await
}

pub async fn activate_session(
    State(state): State<Arc<AppState>>,
    LecturerId(_lecturer_id): LecturerId,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(transition(&state, &session_id, SessionStatus::Active).await?))
}

pub async fn complete_session(
    State(state): State<Arc<AppState>>,
    LecturerId(_lecturer_id): LecturerId,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(transition(&state, &session_id, SessionStatus::Completed).await?))
}

pub async fn cancel_session(
    State(state): State<Arc<AppState>>,
    LecturerId(_lecturer_id): LecturerId,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(transition(&state, &session_id, SessionStatus::Cancelled).await?))
}
