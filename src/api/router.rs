use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{generation, health, session, template};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Templates
        .route("/api/v1/templates", post(template::create_template).get(template::list_templates))
        .route("/api/v1/templates/{template_id}", put(template::update_template).delete(template::delete_template))

        // Generation
        .route("/api/v1/templates/{template_id}/generate", post(generation::generate_sessions))
        .route("/api/v1/templates/{template_id}/preview", post(generation::preview_generation))
        .route("/api/v1/templates/{template_id}/sessions", post(session::create_session_from_template))

        // Sessions
        .route("/api/v1/courses/{course_id}/sessions", get(session::list_course_sessions))
        .route("/api/v1/sessions/{session_id}/activate", post(session::activate_session))
        .route("/api/v1/sessions/{session_id}/complete", post(session::complete_session))
        .route("/api/v1/sessions/{session_id}/cancel", post(session::cancel_session))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        lecturer_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
