use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{
    config::{Config, StoreKind},
    store::{DocumentStore, MemoryStore, MongoStore},
    telemetry, TodoRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format)?;

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::Mongo => {
            tracing::info!(
                database = %config.database,
                collection = %config.collection,
                "using MongoDB store"
            );
            Arc::new(
                MongoStore::connect(&config.mongodb_uri, &config.database, &config.collection)
                    .await
                    .context("configuring MongoDB client")?,
            )
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store, records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    todo_server::run(
        listener,
        TodoRepository::new(store),
        config.allowed_origin,
        shutdown_signal(),
    )
    .await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
