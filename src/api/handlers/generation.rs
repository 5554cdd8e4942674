use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::GenerateSessionsRequest;
use crate::api::extractors::lecturer::LecturerId;
use crate::domain::services::generation::GenerationRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn generate_sessions(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Path(template_id): Path<String>,
    Json(payload): Json<GenerateSessionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .generation_engine
        .generate(
            &lecturer_id,
            GenerationRequest {
                template_id,
                start_date: payload.start_date,
                total_meetings: payload.total_meetings,
            },
        )
        .await?;

    Ok(Json(result))
}

pub async fn preview_generation(
    State(state): State<Arc<AppState>>,
    LecturerId(lecturer_id): LecturerId,
    Path(template_id): Path<String>,
    Json(payload): Json<GenerateSessionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .generation_engine
        .preview(
            &lecturer_id,
            GenerationRequest {
                template_id,
                start_date: payload.start_date,
                total_meetings: payload.total_meetings,
            },
        )
        .await?;

    Ok(Json(result))
}
