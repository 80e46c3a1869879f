//! Health check route
//!
//! `GET /health` always answers 200 while the process is up:
//!
//! ```json
//! { "status": "healthy", "timestamp": "2025-01-01T12:00:00.000Z" }
//! ```

use axum::{Json, Router, routing::get};
use shared::HealthResponse;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
