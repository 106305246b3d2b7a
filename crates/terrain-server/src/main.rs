//! Terrain authentication server binary.

use std::sync::Arc;

use clap::Parser;
use terrain_auth::{MemoryCredentialStore, TokenCodec};
use terrain_server::{bootstrap, create_router, AppState, Args, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terrain_server=info,terrain_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args and read the environment once
    let args = Args::parse();
    let config = ServerConfig::load(&args)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.listen_addr,
        algorithm = ?config.auth.algorithm,
        token_ttl_secs = config.auth.token_ttl.as_secs(),
        "Starting Terrain server"
    );

    // Build the credential store and make sure someone can log in
    let store = Arc::new(MemoryCredentialStore::new());
    let outcome = bootstrap::ensure_privileged_account(store.as_ref(), &config.bootstrap)?;
    info!(outcome = ?outcome, "Bootstrap check complete");

    // Create application state
    let codec = TokenCodec::new(&config.auth)?;
    let state = AppState::new(store, codec, config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl+c");
        return;
    }
    info!("Received shutdown signal");
}
