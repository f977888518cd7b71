use std::time::Duration;

use crate::domain::repository::KeyValueStore;
use crate::infra::cache::RedisKeyValueStore;
use crate::usecase::sms_cache::SmsCacheStore;

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the store so the HTTP layer runs against an in-memory store in tests.
#[derive(Clone)]
pub struct AppState<S = RedisKeyValueStore> {
    pub store: S,
    pub sms_ttl: Duration,
}

impl<S> AppState<S>
where
    S: KeyValueStore + Clone,
{
    pub fn sms_cache(&self) -> SmsCacheStore<S> {
        SmsCacheStore::new(self.store.clone(), self.sms_ttl)
    }
}
