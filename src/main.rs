//! Tokyo events gateway entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use tokyo_events::domain::ports::Clock;
use tokyo_events::{
    CacheSettings, ConfigLoader, EventCache, EventService, EventsHttpServer, GrokClientConfig,
    GrokEventsClient, HttpConfig, LogConfig, LoggerImpl, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "tokyo-events")]
#[command(about = "HTTP gateway for Tokyo event listings", version)]
struct Args {
    /// Dotenv file loaded before reading the environment (skipped if missing)
    #[arg(long = "dotenv", env = "DOTENV_PATH", default_value = ".env")]
    dotenv: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Real environment variables win over the file
    let dotenv_loaded = args.dotenv.is_file();
    if dotenv_loaded {
        dotenvy::from_path(&args.dotenv)
            .with_context(|| format!("Failed to load {}", args.dotenv.display()))?;
    }

    let config = ConfigLoader::load()?;
    let _logger = LoggerImpl::init(&LogConfig::from(&config))?;

    info!(
        environment = %config.node_env,
        debug_mode = config.debug_mode,
        cache_enabled = config.enable_cache,
        cache_duration = config.cache_duration,
        dotenv = dotenv_loaded,
        "configuration loaded"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let source = Arc::new(
        GrokEventsClient::new(GrokClientConfig::from(&config))
            .context("Failed to build upstream client")?,
    );
    let cache = EventCache::new(
        CacheSettings {
            enabled: config.enable_cache,
            ttl: config.cache_ttl(),
        },
        Arc::clone(&clock),
    );
    let event_service = Arc::new(EventService::new(source, cache, Arc::clone(&clock)));

    EventsHttpServer::new(event_service, HttpConfig::from(&config), clock)
        .serve()
        .await
        .context("Gateway stopped with an error")?;

    Ok(())
}
