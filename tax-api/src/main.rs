use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tax_api::{AppState, ServerConfig, build_router, logging};
use tax_core::db::RepositoryRegistry;
use tax_db_sqlite::SqliteRepositoryFactory;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init_logging(config.log_file.as_deref())?;

    let db_config = config.db_config();
    debug!("connecting to {} backend", db_config.backend);
    let repo = build_registry()
        .open(&db_config)
        .await
        .with_context(|| format!("failed to open {} deduction store", db_config.backend))?;

    let state = AppState::new(Arc::from(repo), config.admin_credentials());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(listen_addr = %addr, backend = %db_config.backend, "tax-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("tax-api shutdown complete");
    Ok(())
}
