//! Menu API
//!
//! | Path | Method | Body | Success |
//! |------|--------|------|---------|
//! | /api/menu | GET | - | 200, all items |
//! | /api/menu | POST | multipart or JSON | 201, created item |
//! | /api/menu/{id} | PUT | multipart or JSON, fields optional | 200, updated item |
//! | /api/menu/{id} | DELETE | - | 200, `{message}` |
//!
//! `/api/menu/` is the same collection as `/api/menu`.

mod form;
mod handler;

pub use form::{ImagePart, MenuFields, MenuForm};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};

use crate::core::ServerState;

/// Multipart framing and text fields on top of the image itself
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn router(max_upload_bytes: usize) -> Router<ServerState> {
    let collection = get(handler::list).post(handler::create);
    Router::new()
        .route("/api/menu", collection.clone())
        // Same handlers with a trailing slash
        .route("/api/menu/", collection)
        .route("/api/menu/{id}", put(handler::update).delete(handler::delete))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}
