use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};

use smsrelay_core::config::Config;
use smsrelay_core::tracing::init_tracing;
use smsrelay_sms::config::SmsConfig;
use smsrelay_sms::domain::repository::KeyValueStore;
use smsrelay_sms::infra::cache::{RedisKeyValueStore, create_pool};
use smsrelay_sms::router::build_router;
use smsrelay_sms::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    // Reads `.env` before the subscriber looks at RUST_LOG.
    let config = SmsConfig::from_env();
    init_tracing();

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(anyhow::Error::new(e).context("invalid configuration")),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "sms service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: SmsConfig) -> anyhow::Result<()> {
    let pool = create_pool(&config)?;
    let store = RedisKeyValueStore::new(pool, &config);
    store.ping().await.context("redis ping failed")?;
    info!(
        host = %config.redis_host,
        port = config.redis_port,
        db = config.redis_db,
        pool_size = config.redis_pool_size,
        "connected to redis"
    );

    let state = AppState {
        store,
        sms_ttl: config.sms_ttl(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("sms service listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
