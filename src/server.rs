//! Server initialization and routing
//!
//! Router construction, tracing setup, TCP bind and graceful shutdown
//! live here. The router is public so tests can drive it in-process
//! with substituted downstream components.

use crate::config::GateConfig;
use crate::middleware::log_requests;
use crate::routes::{index, method_not_allowed, not_found, upload};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the router.
///
/// Routes:
/// - `POST /upload_image` - the upload pipeline; any other method on
///   this path gets the 405 envelope
/// - `GET /` - the embedded upload form, only when `view_index` is on
/// - everything else - the 404 envelope
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new().route(
        "/upload_image",
        post(upload::upload_image).fallback(method_not_allowed),
    );

    if state.config.view_index {
        router = router.route("/", get(index::index_page).fallback(method_not_allowed));
    }

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_upload_size()))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway.
///
/// Initializes tracing from the configured level, builds the AWS
/// clients and the router, binds the listener and serves until a
/// shutdown signal arrives. In-flight requests are allowed to finish
/// before this returns.
pub async fn start_server(config: GateConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .json()
        .init();

    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::from_config(config).await?);
    let app = router(state.clone());

    tracing::info!(
        %addr,
        bucket = %state.config.bucket,
        key_prefix = %state.config.key_prefix,
        view_index = state.config.view_index,
        "image-gate starting up"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
