use std::time::Duration;

use smsrelay_core::serde::format_millis;

use crate::domain::extractor::extract;
use crate::domain::keys::{historic_key, latest_key};
use crate::domain::repository::KeyValueStore;
use crate::domain::types::{LatestPointer, RecordOutcome, SmsRecord};
use crate::error::SmsServiceError;

/// Two-key SMS cache on top of a plain TTL store.
///
/// Every record is written under its historic key `sms:{sender}:{received_at}` and
/// under the per-sender pointer `latest_sms:{sender}`. The latest pointer follows write
/// order, not `received_at` order.
pub struct SmsCacheStore<S>
where
    S: KeyValueStore,
{
    pub store: S,
    pub ttl: Duration,
}

impl<S> SmsCacheStore<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Extract the code from `content` and cache the normalized record.
    ///
    /// `sender` and `received_at` are expected to be validated by the caller.
    pub async fn record(
        &self,
        sender: &str,
        content: &str,
        received_at: i64,
    ) -> Result<RecordOutcome, SmsServiceError> {
        // 1. Extract → 400 if the text holds no usable code, nothing is written
        let code = extract(content).ok_or(SmsServiceError::NoCodeFound)?;

        // 2. Normalize: the original text is dropped here
        let record = SmsRecord {
            sender: sender.to_owned(),
            code,
            received_at,
        };
        let payload = record.to_payload()?;

        // 3. Historic write is authoritative; on failure the latest key stays untouched
        let historic_key = historic_key(sender, received_at);
        self.store.set_ex(&historic_key, &payload, self.ttl).await?;

        // 4. Latest write is best-effort; the next record for this sender repairs it
        let pointer_key = latest_key(sender);
        let latest = match self.store.set_ex(&pointer_key, &payload, self.ttl).await {
            Ok(()) => LatestPointer::Updated,
            Err(e) => {
                tracing::warn!(
                    sender,
                    latest_key = %pointer_key,
                    historic_key = %historic_key,
                    error = ?e,
                    "latest pointer not updated"
                );
                LatestPointer::Failed(e)
            }
        };

        tracing::info!(
            sender,
            code = %record.code,
            received_at = %format_millis(received_at),
            "sms recorded"
        );

        Ok(RecordOutcome {
            historic_key,
            record,
            latest,
        })
    }

    /// Most recently written record for `sender`.
    pub async fn latest(&self, sender: &str) -> Result<SmsRecord, SmsServiceError> {
        let payload = self
            .store
            .get(&latest_key(sender))
            .await?
            .ok_or(SmsServiceError::NotFound)?;
        SmsRecord::from_payload(&payload)
    }

    pub async fn ping(&self) -> Result<(), SmsServiceError> {
        self.store.ping().await
    }
}
