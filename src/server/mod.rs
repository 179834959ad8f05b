//! HTTP service that fetches a page and returns it rewritten.
//!
//! Routes:
//!
//! - `POST /fetch` with `{"url": "..."}` and `GET /fetch?url=...` respond with
//!   `{"success": true, "content": "<html>..."}`; a missing url is a 400 with
//!   `{"error": "URL is required"}`, any upstream failure a 500 with
//!   `{"error": "Failed to fetch content"}`.
//! - `GET /health` reports liveness.
//! - Everything else is served from the configured static directory, if any.

pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{FetchConfig, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use fetch::{FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use state::AppState;

/// Run the server until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    run_with_shutdown(config, shutdown_signal()).await
}

/// Run the server with graceful shutdown support.
pub async fn run_with_shutdown<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let state = Arc::new(AppState::new(&config)?);
    let app = create_router(state, config.static_dir.as_deref());

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("faleproxy listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route(
            "/fetch",
            get(handlers::fetch_query).post(handlers::fetch_json),
        )
        .route("/health", get(handlers::health));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Resolve when the process is asked to stop.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
