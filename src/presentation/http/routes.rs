//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(chat_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Participant, message and presence routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/participants",
            get(handlers::participant::list_participants).post(handlers::participant::register),
        )
        .route(
            "/messages",
            get(handlers::message::get_messages).post(handlers::message::send_message),
        )
        .route(
            "/messages/{message_id}",
            put(handlers::message::edit_message).delete(handlers::message::delete_message),
        )
        .route("/status", post(handlers::status::heartbeat))
}
