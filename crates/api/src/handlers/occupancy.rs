//! Read-only occupancy endpoints for UI display.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use gather_core::capacity::AdmissionUnit;
use gather_core::types::{EventId, TrackId};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events/{event_id}/occupancy
pub async fn event_occupancy(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    let occupancy = state
        .admissions
        .occupancy(AdmissionUnit::Event(event_id))
        .await?;
    Ok(Json(DataResponse { data: occupancy }))
}

/// GET /api/v1/tracks/{track_id}/occupancy
pub async fn track_occupancy(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<TrackId>,
) -> AppResult<impl IntoResponse> {
    let occupancy = state
        .admissions
        .occupancy(AdmissionUnit::Track(track_id))
        .await?;
    Ok(Json(DataResponse { data: occupancy }))
}
