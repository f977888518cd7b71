use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::domain::repository::KeyValueStore;
use crate::domain::types::SmsRecord;
use crate::error::SmsServiceError;
use crate::state::AppState;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    fn new(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data,
        }
    }

    fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ReceivedSms {
    pub cache_key: String,
    pub from: String,
    pub timestamp: i64,
    pub code: String,
}

// ── POST /api/receive_sms ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReceiveSmsRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub content: String,
    /// Epoch milliseconds; senders may quote it.
    #[serde(default, deserialize_with = "smsrelay_core::serde::millis_lenient")]
    pub received_at: i64,
}

impl ReceiveSmsRequest {
    fn validate(&self) -> Result<(), SmsServiceError> {
        if self.from.trim().is_empty() {
            return Err(SmsServiceError::InvalidRequest("from is required".to_owned()));
        }
        if self.content.is_empty() {
            return Err(SmsServiceError::InvalidRequest(
                "content is required".to_owned(),
            ));
        }
        if self.received_at == 0 {
            return Err(SmsServiceError::InvalidRequest(
                "received_at is required".to_owned(),
            ));
        }
        Ok(())
    }
}

pub async fn receive_sms<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<ReceiveSmsRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse<ReceivedSms>>, SmsServiceError>
where
    S: KeyValueStore + Clone,
{
    let Json(body) = body.map_err(|e| SmsServiceError::InvalidRequest(e.body_text()))?;
    body.validate()?;

    let outcome = state
        .sms_cache()
        .record(&body.from, &body.content, body.received_at)
        .await?;

    let data = ReceivedSms {
        cache_key: outcome.historic_key,
        from: outcome.record.sender,
        timestamp: outcome.record.received_at,
        code: outcome.record.code.into(),
    };
    Ok(Json(SuccessResponse::new(data).with_message("sms received")))
}

// ── GET /api/latest_sms/{phone} ──────────────────────────────────────────────

pub async fn get_latest_sms<S>(
    State(state): State<AppState<S>>,
    Path(phone): Path<String>,
) -> Result<Json<SuccessResponse<SmsRecord>>, SmsServiceError>
where
    S: KeyValueStore + Clone,
{
    if phone.trim().is_empty() {
        return Err(SmsServiceError::InvalidRequest("phone is required".to_owned()));
    }
    let record = state.sms_cache().latest(&phone).await?;
    Ok(Json(SuccessResponse::new(record)))
}
