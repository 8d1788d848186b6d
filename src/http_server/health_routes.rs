//! Health HTTP Routes
//!
//! `/health` reports that the process is up. `/ping` additionally
//! round-trips to the database.

use std::sync::Arc;

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;

use super::book_routes::BookState;
use super::response::ErrorResponse;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Database ping response
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub now: String,
}

/// Create health routes
pub fn health_routes(state: Arc<BookState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Database ping handler
async fn ping_handler(State(state): State<Arc<BookState>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(now) => (StatusCode::OK, Json(PingResponse { ok: true, now })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "database ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DB error")),
            )
                .into_response()
        }
    }
}
