use axum::{extract::State, http::StatusCode};

use crate::domain::repository::KeyValueStore;
use crate::state::AppState;

/// Handler for `GET /readyz`: ready when the store answers `PING`.
pub async fn readyz<S>(State(state): State<AppState<S>>) -> StatusCode
where
    S: KeyValueStore + Clone,
{
    match state.sms_cache().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = ?e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
