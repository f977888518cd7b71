use std::time::Duration;

use serde::Deserialize;
use smsrelay_core::config::Config;
use url::Url;

use crate::domain::types::DEFAULT_SMS_TTL_SECS;

/// SMS service configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// Redis host (default `localhost`). Env var: `REDIS_HOST`.
    #[serde(default = "default_redis_host")]
    pub redis_host: String,
    /// Redis port (default 6379). Env var: `REDIS_PORT`.
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,
    /// Redis password, empty for none. Env var: `REDIS_PASSWORD`.
    #[serde(default)]
    pub redis_password: String,
    /// Redis logical database index (default 0). Env var: `REDIS_DB`.
    #[serde(default)]
    pub redis_db: u32,
    /// Maximum pooled connections (default 10). Env var: `REDIS_POOL_SIZE`.
    #[serde(default = "default_redis_pool_size")]
    pub redis_pool_size: usize,
    #[serde(default = "default_connect_timeout_secs")]
    pub redis_connect_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub redis_read_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub redis_write_timeout_secs: u64,
    /// How long a request waits for a free pooled connection.
    #[serde(default = "default_io_timeout_secs")]
    pub redis_pool_timeout_secs: u64,
    /// TTL of both the historic and the latest entry (default 120). Env var: `SMS_TTL_SECS`.
    #[serde(default = "default_sms_ttl_secs")]
    pub sms_ttl_secs: u64,
    /// HTTP listen port (default 8080). Env var: `SERVER_PORT`.
    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Config for SmsConfig {}

fn default_redis_host() -> String {
    "localhost".to_owned()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_redis_pool_size() -> usize {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_io_timeout_secs() -> u64 {
    30
}

fn default_sms_ttl_secs() -> u64 {
    DEFAULT_SMS_TTL_SECS
}

fn default_server_port() -> u16 {
    8080
}

impl SmsConfig {
    /// `redis://[:password@]host:port/db`, with the password percent-encoded.
    pub fn redis_url(&self) -> anyhow::Result<String> {
        let mut url = Url::parse(&format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        ))?;
        if !self.redis_password.is_empty() {
            url.set_password(Some(&self.redis_password))
                .map_err(|()| anyhow::anyhow!("cannot set password on {}", self.redis_host))?;
        }
        Ok(url.into())
    }

    pub fn sms_ttl(&self) -> Duration {
        Duration::from_secs(self.sms_ttl_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_write_timeout_secs)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_pool_timeout_secs)
    }
}
