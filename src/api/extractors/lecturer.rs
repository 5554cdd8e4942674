use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use std::sync::Arc;

/// Lecturer identity forwarded by the authenticating gateway in front of
/// this service. Ownership checks against it happen in the handlers and
/// the generation engine.
pub struct LecturerId(pub String);

impl FromRequestParts<Arc<AppState>> for LecturerId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let lecturer_id = parts
            .headers
            .get("X-Lecturer-Id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(LecturerId(lecturer_id.to_string()))
    }
}
