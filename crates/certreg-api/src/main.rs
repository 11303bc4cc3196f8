//! # certreg-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the certificate registry.
//! Binds to configurable port (default 4000).

use std::sync::Arc;

use certreg_api::db::{self, PgStore};
use certreg_api::state::{AppConfig, AppState};
use certreg_content::ContentStoreConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing. LOG_FORMAT=json selects JSON lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    let content_config = ContentStoreConfig::from_env().map_err(|e| {
        tracing::error!("Content store configuration invalid: {e}");
        e
    })?;
    tracing::info!(?content_config, "content store configured");
    let content = certreg_content::connect(content_config).map_err(|e| {
        tracing::error!("Content store client construction failed: {e}");
        e
    })?;

    // Initialize database pool (optional; absent means in-memory only).
    let db_pool = db::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    tokio::fs::create_dir_all(&config.upload_dir).await.map_err(|e| {
        tracing::error!(dir = %config.upload_dir.display(), "Cannot create upload directory: {e}");
        e
    })?;

    let port = config.port;
    let state = match db_pool {
        Some(pool) => {
            let store = Arc::new(PgStore::new(pool));
            AppState::with_backends(config, store.clone(), store, content)
        }
        None => AppState::in_memory(config, content),
    };

    let app = certreg_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("certreg API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
