use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dairy_ledger_backend::{config::AppConfig, create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!("Storage: {:?}", config.storage);
    info!("CORS: {:?}", config.cors);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
