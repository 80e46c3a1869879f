//! Reservation API
//!
//! Reservations can be listed, created and deleted; there is no update.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let collection = get(handler::list).post(handler::create);
    Router::new()
        .route("/api/reservation", collection.clone())
        .route("/api/reservation/", collection)
        .route("/api/reservation/{id}", delete(handler::delete))
}
