use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use todo_server::{InMemoryStore, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    config.validate()?;

    let app = todo_server::router(Arc::new(InMemoryStore::new()), &config.prefix);
    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(prefix = %config.prefix, "listening on {}", listener.local_addr()?);

    todo_server::serve(listener, app, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
