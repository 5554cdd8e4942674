use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::NaiveTime;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateTemplateRequest, UpdateTemplateRequest};
use crate::api::dtos::responses::TemplateResponse;
use crate::api::extractors::lecturer::LecturerId;
use crate::domain::models::template::{NewTemplateParams, SessionTemplate, TimeWindow, Weekdays};
use crate::error::AppError;
use crate::state::AppState;

fn parse_time(value: &str, label: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected HH:MM)", label)))
}

fn parse_weekdays(days: &[u8]) -> Result<Weekdays, AppError> {
    let weekdays = Weekdays::from_days(days)?;
    if weekdays.is_empty() {
        return Err(AppError::Validation("At least one weekday is required".into()));
    }
    Ok(weekdays)
}

async fn load_owned_template(
    state: &AppState,
    lecturer_id: &str,
    template_id: &str,
) -> Result<SessionTemplate, AppError> {
    let template = state
        .template_repo
        .find_by_id(template_id)
        .await?
        .ok_or(AppError::NotFound("Template not found".into()))?;

    if template.lecturer_id != lecturer_id {
        return Err(AppError::Forbidden("Template belongs to another lecturer".into()));
    }
    Ok(template)
}

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let start = parse_time(&payload.start_time, "start time")?;
    let end = parse_time(&payload.end_time, "end time")?;
    let window = TimeWindow::new(start, end)?;
    let weekdays = parse_weekdays(&payload.default_days)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Template name is required".into()));
    }

    let template = SessionTemplate::new(NewTemplateParams {
        lecturer_id: lecturer_id.clone(),
        course_id: payload.course_id,
        name: payload.name,
        description: payload.description,
        window,
        weekdays,
        auto_activate: payload.auto_activate.unwrap_or(false),
    });

    let created = state.template_repo.create(&template).await?;
    info!("Created session template {} for lecturer {}", created.id, lecturer_id);
    Ok(Json(TemplateResponse::from(created)))
}

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.template_repo.list_by_lecturer(&lecturer_id).await?;
    let body: Vec<TemplateResponse> = templates.into_iter().map(TemplateResponse::from).collect();
    Ok(Json(body))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Path(template_id): Path<String>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut template = load_owned_template(&state, &lecturer_id, &template_id).await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Template name is required".into()));
        }
        template.name = name;
    }
    if let Some(description) = payload.description {
        // An explicit null clears the description.
        template.description = description;
    }
    if let Some(start) = payload.start_time {
        template.start_time = parse_time(&start, "start time")?;
    }
    if let Some(end) = payload.end_time {
        template.end_time = parse_time(&end, "end time")?;
    }
    // Re-validate the window after partial edits.
    TimeWindow::new(template.start_time, template.end_time)?;

    if let Some(days) = payload.default_days {
        let weekdays = parse_weekdays(&days)?;
        template.default_days = serde_json::to_string(&weekdays.to_days())
            .map_err(|_| AppError::Internal)?;
    }
    if let Some(auto_activate) = payload.auto_activate {
        template.auto_activate = auto_activate;
    }
    if let Some(is_active) = payload.is_active {
        template.is_active = is_active;
    }

    let updated = state.template_repo.update(&template).await?;
    Ok(Json(TemplateResponse::from(updated)))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    load_owned_template(&state, &lecturer_id, &template_id).await?;
    state.template_repo.delete(&template_id).await?;
    info!("Deleted session template {}", template_id);
    Ok(Json(serde_json::json!({ "deleted": template_id })))
}
