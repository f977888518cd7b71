use std::future::Future;
use std::time::Duration;

use crate::error::SmsServiceError;

/// Port for the TTL key-value store backing the SMS cache (Redis in production).
///
/// Implementations classify failures themselves: connectivity problems and timeouts
/// are `StoreUnavailable`, any other failure is `StoreWriteFailed` for writes and
/// `StoreReadFailed` for reads.
pub trait KeyValueStore: Send + Sync {
    /// `SET key value EX ttl`. Overwrites any existing value.
    fn set_ex(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> impl Future<Output = Result<(), SmsServiceError>> + Send;

    /// `GET key`. An absent or expired key is `Ok(None)`.
    fn get(&self, key: &str)
    -> impl Future<Output = Result<Option<Vec<u8>>, SmsServiceError>> + Send;

    /// Round-trip check used by the readiness check.
    fn ping(&self) -> impl Future<Output = Result<(), SmsServiceError>> + Send;
}
