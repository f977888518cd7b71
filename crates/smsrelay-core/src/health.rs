use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness check.
///
/// Readiness depends on each service's backing stores, so services provide their own
/// `/readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
