//! Cache key layout. External tooling reads these keys directly, so the formats are
//! part of the service contract.

/// Historic key: one entry per `(sender, received_at)` pair.
pub fn historic_key(sender: &str, received_at: i64) -> String {
    format!("sms:{}:{}", sender, received_at)
}

/// Latest key: one entry per sender, overwritten by every successful record.
pub fn latest_key(sender: &str) -> String {
    format!("latest_sms:{}", sender)
}
