// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Journal HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the exchange pipeline.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use solace_config::model::ServerConfig;
use solace_core::{JournalStore, SolaceError};
use solace_exchange::ExchangeCoordinator;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message store serving reads and the exchange pipeline's writes.
    pub store: Arc<dyn JournalStore>,
    /// Coordinator driving the persist/complete/persist cycle.
    pub coordinator: Arc<ExchangeCoordinator>,
}

/// Builds the application router over the given state.
///
/// Routes:
/// - GET  /health
/// - POST /api/v1/journal/entries
/// - GET  /api/v1/journal/entries
/// - GET  /api/v1/journal/entries/{id}/messages
/// - POST /api/v1/journal/entries/{id}/messages (the exchange endpoint)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/api/v1/journal/entries",
            post(handlers::post_entries).get(handlers::get_entries),
        )
        .route(
            "/api/v1/journal/entries/{id}/messages",
            get(handlers::get_messages).post(handlers::post_exchange),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the token is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), SolaceError> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| SolaceError::Channel {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("server listening on {addr}");
    serve_on(listener, state, shutdown).await
}

/// Serves requests on an already-bound listener until the token is
/// cancelled. Split from [`start_server`] so tests can bind port 0 and
/// read back the ephemeral address first.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), SolaceError> {
    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| SolaceError::Channel {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })
}
