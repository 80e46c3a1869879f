use axum::{Json, extract::State};
use http::StatusCode;
use shared::AppResult;
use shared::models::{Contact, ContactCreate};

use crate::core::ServerState;
use crate::db::{RepoResultExt, Repository};
use crate::utils::ValidatedJson;

/// POST /api/contact
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<ContactCreate>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let repo = Repository::<Contact>::new(&state.db);
    let contact = repo.create(&payload).await.or_fail("Failed to save contact")?;

    tracing::info!(id = %contact.id, "Contact message saved");
    Ok((StatusCode::CREATED, Json(contact)))
}
