use attendance_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::{build_state, run_sqlite_migrations},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .unwrap();

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url,
            port: 0,
            max_meetings_per_generation: 30,
        };

        let state = Arc::new(build_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self { router, pool, db_filename, state }
    }

    pub async fn request(&self, method: &str, uri: &str, lecturer: Option<&str>, body: Option<Value>) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(lecturer_id) = lecturer {
            builder = builder.header("X-Lecturer-Id", lecturer_id);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a Monday/Wednesday 08:00-10:00 template and returns its id.
#[allow(dead_code)]
pub async fn create_mon_wed_template(app: &TestApp, lecturer: &str, course: &str) -> String {
    let res = app.request(
        "POST",
        "/api/v1/templates",
        Some(lecturer),
        Some(serde_json::json!({
            "course_id": course,
            "name": "Weekly lecture",
            "start_time": "08:00",
            "end_time": "10:00",
            "default_days": [1, 3]
        })),
    ).await;
    assert_eq!(res.status(), axum::http::StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}
