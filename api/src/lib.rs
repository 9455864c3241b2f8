//! HTTP surface of the gateway: channel webhooks, the website chat endpoint,
//! and the usage dashboard feed.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

#[cfg(test)]
mod test_support;

pub use crate::core::app_state::{AppState, ConfigError, ServerSettings};
pub use crate::error_handler::AppError;

use crate::middleware_layer::{cors::cors, request_id::request_id};
use crate::routes::{
    chat::chat_route::chat,
    health_route::health,
    messenger::messenger_route::{receive, verify},
    stats::stats_route::stats,
    telegram::telegram_route::telegram_update,
};

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/webhook/messenger", get(verify).post(receive))
        .route("/webhook/telegram", post(telegram_update))
        .route("/api/stats", get(stats))
        .route("/health", get(health))
        .fallback(|| async { AppError::NotFound })
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Binds `state.settings.address` and serves until Ctrl+C, then closes the
/// store handle and flushes usage stats.
pub async fn start(state: Arc<AppState>) -> Result<(), AppError> {
    let addr = state.settings.address.clone();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(
        address = %addr,
        environment = %state.settings.environment,
        public_url = state.settings.public_url.as_deref().unwrap_or("-"),
        "server listening"
    );

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    state.shutdown().await;
    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
