use serde::Serialize;

use crate::domain::models::template::SessionTemplate;

#[derive(Serialize)]
pub struct TemplateResponse {
    #[serde(flatten)]
    pub template: SessionTemplate,
    pub duration_minutes: i64,
}

impl From<SessionTemplate> for TemplateResponse {
    fn from(template: SessionTemplate) -> Self {
        let duration_minutes = template.duration_minutes();
        Self { template, duration_minutes }
    }
}
