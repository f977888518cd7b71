use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use smsrelay_core::health::healthz;
use smsrelay_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::domain::repository::KeyValueStore;
use crate::handlers::{
    health::readyz,
    sms::{get_latest_sms, receive_sms},
};
use crate::state::AppState;

pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: KeyValueStore + Clone + 'static,
{
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<S>))
        // SMS
        .route("/api/receive_sms", post(receive_sms::<S>))
        .route("/api/latest_sms/{phone}", get(get_latest_sms::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
