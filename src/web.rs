//! HTTP server bootstrap

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::GolfcastConfig;
use crate::error::{GolfcastError, Result};

/// Start the API server and block until it shuts down
pub async fn run(config: GolfcastConfig) -> Result<()> {
    let request_timeout = Duration::from_secs(u64::from(config.server.request_timeout_seconds));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState::new(config)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GolfcastError::general(format!("Failed to bind {addr}: {e}")))?;

    info!("Golfcast server running at http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| GolfcastError::general(format!("Server error: {e}")))?;

    Ok(())
}
