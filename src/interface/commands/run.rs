//! The long-running `run` command: wires the feed source, recipient
//! directory, Matrix destinations and the engine, then waits for Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use matrix_sdk::config::SyncSettings;

use crate::application::directory::CachedDirectory;
use crate::application::dispatcher::FanoutDispatcher;
use crate::application::engine::Engine;
use crate::application::history::DedupHistory;
use crate::application::subscription::PollTiming;
use crate::domain::config::{AppConfig, DirectoryBackend, DirectoryConfig};
use crate::domain::registry::FeedRegistry;
use crate::domain::traits::{FeedSource, RecipientDirectory};
use crate::infrastructure::http::HttpFeedSource;
use crate::infrastructure::matrix::{self, MatrixDestinations};
use crate::infrastructure::store::FileDirectory;
use crate::strings::logs;

/// Opens the configured backend without the TTL cache in front of it.
pub async fn open_directory(config: &DirectoryConfig) -> Result<Arc<dyn RecipientDirectory>> {
    match config.backend {
        DirectoryBackend::File => Ok(Arc::new(FileDirectory::new(&config.path))),
        DirectoryBackend::Redis => open_redis(config).await,
    }
}

#[cfg(feature = "redis")]
async fn open_redis(config: &DirectoryConfig) -> Result<Arc<dyn RecipientDirectory>> {
    use crate::infrastructure::redis_store::RedisDirectory;

    let url = config
        .redis_url
        .as_deref()
        .context("directory.redis_url is required for the redis backend")?;
    Ok(Arc::new(RedisDirectory::connect(url, &config.redis_key).await?))
}

#[cfg(not(feature = "redis"))]
async fn open_redis(_config: &DirectoryConfig) -> Result<Arc<dyn RecipientDirectory>> {
    anyhow::bail!("The redis directory backend requires building with `--features redis`")
}

pub async fn handle_run(config: &AppConfig, registry: &FeedRegistry) -> Result<()> {
    if registry.is_empty() {
        tracing::warn!("No feeds configured, nothing will be announced");
    }

    let source: Arc<dyn FeedSource> = Arc::new(HttpFeedSource::new(
        &config.feeds.source_url,
        config.feeds.request_timeout(),
    )?);
    let directory = CachedDirectory::wrap(
        open_directory(&config.directory).await?,
        Duration::from_secs(config.directory.cache_ttl_secs),
    );
    let history = Arc::new(DedupHistory::with_capacity(config.dedup.capacity));

    let client = matrix::connect(&config.services.matrix)
        .await
        .context("Failed to connect to Matrix")?;
    let destinations = Arc::new(MatrixDestinations::new(client.clone()));

    let dispatcher = FanoutDispatcher::new(history.clone(), directory, destinations);
    let timing = PollTiming {
        interval: config.feeds.poll_interval(),
        retry: config.feeds.retry_interval(),
    };
    let engine = Engine::start(registry, timing, source, dispatcher);

    // Keeps room membership current (and accepts invites) while the engine runs.
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let sync_client = client.clone();
    let mut sync = tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    tokio::select! {
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => tracing::info!("{}", logs::SHUTDOWN),
            Err(e) => tracing::error!("{}", logs::shutdown_fail(&e.to_string())),
        },
        joined = &mut sync => match joined {
            Ok(Ok(())) => tracing::warn!("Sync loop ended"),
            Ok(Err(e)) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
            Err(e) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
        },
    }

    sync.abort();
    let subscriptions = engine.subscriptions();
    engine.shutdown_and_join().await;
    tracing::info!(subscriptions, dispatched = history.len(), "session finished");
    Ok(())
}
