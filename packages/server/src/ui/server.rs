//! Router assembly and server startup.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handler::{http, notifications, websocket};
use super::signal::shutdown_signal;
use super::state::AppState;

/// Build the full route table. Public so integration tests can serve the
/// router on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(http::health_check))
        .route("/api/sessions", get(http::get_sessions))
        .route("/api/sessions/{session_id}", get(http::get_session_detail))
        .route("/api/notifications", post(http::push_notification))
        .route("/debug/sessions", get(http::debug_sessions))
        .route("/ws", get(websocket::websocket_handler))
        .route(
            "/ws/notifications",
            get(notifications::notification_channel_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Server {
    host: String,
    port: u16,
}

impl Server {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    pub async fn run(&self, state: Arc<AppState>) -> Result<(), std::io::Error> {
        let app = build_router(state);
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Server listening on {}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
