//! REST API over the analytics pipeline.
//!
//! Six GET endpoints: health and banner, dashboard stats and devices,
//! the hourly consumption series, and ranked recommendations. Every
//! request triggers one independent pipeline invocation over a fresh
//! catalog snapshot; handlers share no mutable state.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::DeviceProvider;
use crate::config::AppConfig;

/// Immutable application state shared across all request handlers.
///
/// Wrapped in `Arc`; no locks needed since both the configuration and
/// the catalog provider are read-only.
pub struct AppState {
    /// Service configuration.
    pub config: AppConfig,
    /// Read-only device inventory source.
    pub catalog: Box<dyn DeviceProvider>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::root))
        .route("/api/dashboard/stats", get(handlers::dashboard_stats))
        .route("/api/dashboard/devices", get(handlers::dashboard_devices))
        .route(
            "/api/analytics/consumption",
            get(handlers::analytics_consumption),
        )
        .route("/api/recommendations", get(handlers::recommendations))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds to the given address and serves the API until ctrl-c.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server
/// fails while running.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
