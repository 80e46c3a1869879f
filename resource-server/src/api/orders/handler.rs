//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::{AppResult, MessageResponse};

use crate::core::ServerState;
use crate::db::{RepoResultExt, Repository};
use crate::utils::ValidatedJson;

/// GET /api/orders - all orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let repo = Repository::<Order>::new(&state.db);
    let orders = repo.find_all().await.or_fail("Failed to fetch orders")?;
    Ok(Json(orders))
}

/// POST /api/orders - place an order
///
/// `itemId` is stored as given; the menu is not consulted.
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let repo = Repository::<Order>::new(&state.db);
    let order = repo.create(&payload).await.or_fail("Failed to place order")?;

    tracing::info!(id = %order.id, item_id = %order.item_id, quantity = order.quantity, "Order placed");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Order placed successfully!")),
    ))
}

/// PUT /api/orders/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = Repository::<Order>::new(&state.db);
    let order = repo.update(&id, &payload).await.or_fail("Update failed")?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - idempotent
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = Repository::<Order>::new(&state.db);
    let removed = repo.delete(&id).await.or_fail("Failed to delete order")?;

    tracing::debug!(id = %id, removed, "Order delete");
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
