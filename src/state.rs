use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{SessionRepository, TemplateRepository};
use crate::domain::services::generation::GenerationEngine;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub generation_engine: Arc<GenerationEngine>,
}
