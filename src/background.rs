use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

/// Promotes SCHEDULED sessions to ACTIVE once their date arrives, including
/// sessions missed during downtime. Sessions created with auto_activate for
/// today's date never reach this path; the engine activates those at
/// creation time.
pub async fn start_activation_worker(state: Arc<AppState>) {
    info!("Starting session activation worker...");

    loop {
        let today = Utc::now().date_naive();
        let span = info_span!("session_activation", date = %today);

        async {
            match state.session_repo.activate_due(today).await {
                Ok(0) => {}
                Ok(count) => info!("Activated {} session(s) due today", count),
                Err(e) => error!("Failed to activate due sessions: {:?}", e),
            }
        }
            .instrument(span)
            .await;

        sleep(Duration::from_secs(60)).await;
    }
}
