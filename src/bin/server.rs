//! DTS HTTP Server Binary
//!
//! Main entry point for the Department Timetabling Service REST API. It
//! loads configuration, wires the repository, session store, generation
//! engine and notifier together, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dts-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ENGINE_URL`: Base URL of a remote generation engine (default: in-process engine)
//! - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`: enable the Telegram relay
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dts_rust::auth::MemorySessionStore;
use dts_rust::config::ServiceConfig;
use dts_rust::db::RepositoryFactory;
use dts_rust::http::{create_router, AppState};
use dts_rust::services::generation::{GenerationEngine, HttpEngine, LocalEngine};
use dts_rust::services::notifier::{Notifier, NullNotifier, TelegramNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting DTS HTTP Server");

    let config = ServiceConfig::load()?;

    let repository = RepositoryFactory::create_local();
    info!("Repository initialized (type: {})", config.repository.repo_type);

    let engine: Arc<dyn GenerationEngine> = match config.engine.mode.as_str() {
        "http" => {
            if config.engine.base_url.is_empty() {
                anyhow::bail!("engine.mode = \"http\" requires engine.base_url");
            }
            info!("Using remote generation engine at {}", config.engine.base_url);
            Arc::new(HttpEngine::new(config.engine.base_url.clone()))
        }
        _ => {
            info!("Using in-process generation engine");
            Arc::new(LocalEngine::new(repository.clone()))
        }
    };

    let notifier: Arc<dyn Notifier> = if config.telegram_enabled() {
        info!("Telegram relay enabled");
        Arc::new(TelegramNotifier::new(
            config.telegram.bot_token.clone(),
            config.telegram.chat_id.clone(),
        ))
    } else {
        Arc::new(NullNotifier)
    };

    let state = AppState::new(
        repository,
        Arc::new(MemorySessionStore::new()),
        engine,
        notifier,
        Duration::from_millis(config.engine.poll_interval_ms),
    );

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
