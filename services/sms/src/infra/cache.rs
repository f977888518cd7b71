use std::time::Duration;

use anyhow::Context;
use deadpool_redis::redis::{AsyncCommands, RedisError, cmd};
use deadpool_redis::{Pool, PoolConfig, Runtime};
use tokio::time::timeout;

use crate::config::SmsConfig;
use crate::domain::repository::KeyValueStore;
use crate::error::SmsServiceError;

/// Build the Redis pool. No connection is opened until first use.
///
/// The connect timeout bounds opening a new connection, the pool timeout bounds
/// waiting for a free one.
pub fn create_pool(config: &SmsConfig) -> anyhow::Result<Pool> {
    let mut redis_cfg = deadpool_redis::Config::from_url(config.redis_url()?);
    let mut pool_cfg = PoolConfig::new(config.redis_pool_size);
    pool_cfg.timeouts.wait = Some(config.pool_timeout());
    pool_cfg.timeouts.create = Some(config.connect_timeout());
    pool_cfg.timeouts.recycle = Some(config.connect_timeout());
    redis_cfg.pool = Some(pool_cfg);
    redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .context("failed to create Redis pool")
}

#[derive(Clone)]
pub struct RedisKeyValueStore {
    pub pool: Pool,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl RedisKeyValueStore {
    pub fn new(pool: Pool, config: &SmsConfig) -> Self {
        Self {
            pool,
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
        }
    }

    async fn conn(&self) -> Result<deadpool_redis::Connection, SmsServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| SmsServiceError::StoreUnavailable(e.into()))
    }
}

/// Transport failures mean the store is unreachable; anything else is a command
/// failure reported through `otherwise`.
fn classify(e: RedisError, otherwise: fn(anyhow::Error) -> SmsServiceError) -> SmsServiceError {
    if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
    {
        SmsServiceError::StoreUnavailable(e.into())
    } else {
        otherwise(e.into())
    }
}

fn timed_out(e: tokio::time::error::Elapsed) -> SmsServiceError {
    SmsServiceError::StoreUnavailable(anyhow::Error::new(e).context("redis command timed out"))
}

impl KeyValueStore for RedisKeyValueStore {
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), SmsServiceError> {
        let mut conn = self.conn().await?;
        // SET EX rejects 0; sub-second TTLs round up to one second.
        let secs = ttl.as_secs().max(1);
        let result: Result<(), RedisError> =
            timeout(self.write_timeout, conn.set_ex(key, value.to_vec(), secs))
                .await
                .map_err(timed_out)?;
        result.map_err(|e| classify(e, SmsServiceError::StoreWriteFailed))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SmsServiceError> {
        let mut conn = self.conn().await?;
        let result: Result<Option<Vec<u8>>, RedisError> = timeout(self.read_timeout, conn.get(key))
            .await
            .map_err(timed_out)?;
        result.map_err(|e| classify(e, SmsServiceError::StoreReadFailed))
    }

    async fn ping(&self) -> Result<(), SmsServiceError> {
        let mut conn = self.conn().await?;
        let result: Result<String, RedisError> =
            timeout(self.read_timeout, cmd("PING").query_async(&mut conn))
                .await
                .map_err(timed_out)?;
        result
            .map(|_| ())
            .map_err(|e| classify(e, SmsServiceError::StoreReadFailed))
    }
}
