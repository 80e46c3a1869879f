//! Upload Routes
//!
//! Serves menu images stored by the menu handlers.
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /uploads/{filename} | GET | bytes with a guessed Content-Type |

mod storage;

pub use storage::{UploadStore, is_safe_filename, sanitize_filename};

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::header;
use shared::AppResult;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{filename}", get(serve_uploaded_file))
}

/// GET /uploads/{filename}
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let content = state.uploads.read(&filename).await.inspect_err(|e| {
        tracing::debug!(filename = %filename, code = %e.code, "Upload not served");
    })?;

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        content,
    )
        .into_response())
}
