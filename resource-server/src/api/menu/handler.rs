//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::MenuItem;
use shared::{AppError, AppResult, MessageResponse};

use super::form::{ImagePart, MenuForm};
use crate::core::ServerState;
use crate::db::{RepoResultExt, Repository};
use crate::utils::Validate;
use crate::utils::money::round_price;

/// GET /api/menu - all menu items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = Repository::<MenuItem>::new(&state.db);
    let items = repo.find_all().await.or_fail("Failed to fetch menu items")?;
    Ok(Json(items))
}

/// POST /api/menu - create an item, optionally with an image
pub async fn create(
    State(state): State<ServerState>,
    form: MenuForm,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let mut payload = form.fields.into_create()?;
    payload.validate()?;
    payload.price = round_price(payload.price);

    if let Some(image) = form.image {
        payload.image = Some(store_image(&state, image).await?);
    }

    let repo = Repository::<MenuItem>::new(&state.db);
    let created = repo.create(&payload).await.or_fail("Failed to add menu item");
    let item = discard_image_on_error(&state, payload.image.as_deref(), created).await?;

    tracing::info!(id = %item.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu/{id} - partial update; the stored image is kept unless
/// a new one is attached
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: MenuForm,
) -> AppResult<Json<MenuItem>> {
    let mut payload = form.fields.into_update();
    payload.validate()?;
    payload.price = payload.price.map(round_price);

    let repo = Repository::<MenuItem>::new(&state.db);

    // Look the item up first when there is an image to store (no orphan
    // files for unknown ids) or nothing to write at all
    if form.image.is_some() || payload.is_empty() {
        let existing = repo
            .find_by_id(&id)
            .await
            .or_fail("Update failed")?
            .ok_or_else(|| AppError::not_found("Menu item"))?;
        match form.image {
            Some(image) => payload.image = Some(store_image(&state, image).await?),
            None => return Ok(Json(existing)),
        }
    }

    let updated = repo.update(&id, &payload).await.or_fail("Update failed");
    let item = discard_image_on_error(&state, payload.image.as_deref(), updated).await?;

    tracing::info!(id = %item.id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu/{id} - idempotent
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = Repository::<MenuItem>::new(&state.db);
    let removed = repo.delete(&id).await.or_fail("Delete failed")?;

    tracing::debug!(id = %id, removed, "Menu item delete");
    Ok(Json(MessageResponse::new("Menu item deleted")))
}

async fn store_image(state: &ServerState, image: ImagePart) -> AppResult<String> {
    state.uploads.save(&image.file_name, &image.data).await
}

/// Remove an image stored for a write that then failed
async fn discard_image_on_error<T>(
    state: &ServerState,
    image: Option<&str>,
    result: AppResult<T>,
) -> AppResult<T> {
    if result.is_err()
        && let Some(filename) = image
    {
        state.uploads.remove(filename).await;
    }
    result
}
