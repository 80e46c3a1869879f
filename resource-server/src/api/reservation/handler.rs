//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::models::{Reservation, ReservationCreate};
use shared::{AppResult, MessageResponse};

use crate::core::ServerState;
use crate::db::{RepoResultExt, Repository};
use crate::utils::ValidatedJson;

/// GET /api/reservation
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let repo = Repository::<Reservation>::new(&state.db);
    let reservations = repo
        .find_all()
        .await
        .or_fail("Failed to fetch reservations")?;
    Ok(Json(reservations))
}

/// POST /api/reservation
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let repo = Repository::<Reservation>::new(&state.db);
    let reservation = repo
        .create(&payload)
        .await
        .or_fail("Failed to save reservation")?;

    tracing::info!(
        id = %reservation.id,
        date = %reservation.date,
        guests = reservation.guests,
        "Reservation saved"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// DELETE /api/reservation/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = Repository::<Reservation>::new(&state.db);
    let removed = repo
        .delete(&id)
        .await
        .or_fail("Failed to delete reservation")?;

    tracing::debug!(id = %id, removed, "Reservation delete");
    Ok(Json(MessageResponse::new("Reservation deleted successfully")))
}
