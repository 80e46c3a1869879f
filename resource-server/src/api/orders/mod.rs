//! Order API
//!
//! | Path | Method | Success |
//! |------|--------|---------|
//! | /api/orders | GET | 200, all orders |
//! | /api/orders | POST | 201, `{message}` |
//! | /api/orders/{id} | PUT | 200, updated order |
//! | /api/orders/{id} | DELETE | 200, `{message}` |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let collection = get(handler::list).post(handler::create);
    Router::new()
        .route("/api/orders", collection.clone())
        .route("/api/orders/", collection)
        .route("/api/orders/{id}", put(handler::update).delete(handler::delete))
}
