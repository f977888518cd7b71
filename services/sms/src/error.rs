use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// SMS service error variants.
#[derive(Debug, thiserror::Error)]
pub enum SmsServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("no verification code found in content")]
    NoCodeFound,
    #[error("no sms found for sender")]
    NotFound,
    #[error("failed to serialize sms record")]
    SerializationFailed(#[source] serde_json::Error),
    #[error("failed to write to store")]
    StoreWriteFailed(#[source] anyhow::Error),
    #[error("failed to read from store")]
    StoreReadFailed(#[source] anyhow::Error),
    #[error("store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("stored sms record is corrupt")]
    CorruptRecord(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SmsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::NoCodeFound => "NO_CODE_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::SerializationFailed(_) => "SERIALIZATION_FAILED",
            Self::StoreWriteFailed(_) => "STORE_WRITE_FAILED",
            Self::StoreReadFailed(_) => "STORE_READ_FAILED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CorruptRecord(_) => "CORRUPT_RECORD",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::NoCodeFound => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SerializationFailed(_)
            | Self::StoreWriteFailed(_)
            | Self::StoreReadFailed(_)
            | Self::CorruptRecord(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SmsServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected outcomes (no code in the text, nothing cached yet).
        // Server-side faults carry a cause chain that must reach the logs.
        if status.is_server_error() {
            tracing::error!(error = ?self, kind = self.kind(), "request failed");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
