//! Contact API - append-only, create is the only operation

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/contact", post(handler::create))
        .route("/api/contact/", post(handler::create))
}
