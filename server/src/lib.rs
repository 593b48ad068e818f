//! HTTP service exposing create/read/update/delete over a collection of
//! to-do records kept in a document database.
//!
//! Requests flow router → `TodoRepository` → `DocumentStore`. The store is
//! constructed by the caller and injected, so the same router runs against
//! MongoDB in production and `MemoryStore` in tests.

pub mod config;
pub mod error;
pub mod extract;
pub mod repository;
pub mod routes;
pub mod store;
pub mod telemetry;

use std::future::Future;

use axum::http::HeaderValue;
use tokio::net::TcpListener;

pub use repository::TodoRepository;
pub use routes::app;

/// Serve until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    repo: TodoRepository,
    allowed_origin: HeaderValue,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(repo, allowed_origin))
        .with_graceful_shutdown(shutdown)
        .await
}
