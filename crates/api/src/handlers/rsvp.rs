//! Handlers for the RSVP lifecycle: request admission, confirm or change
//! a track, join the waitlist, cancel, and activity-level RSVPs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use gather_core::status::RsvpStatus;
use gather_core::transitions::AdmissionIntent;
use gather_core::types::{ActivityId, EventId, TrackId};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn default_guest_count() -> i32 {
    1
}

fn default_intent() -> AdmissionIntent {
    AdmissionIntent::Attend
}

/// Request body for the RSVP endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RsvpRequest {
    /// What the attendee wants: `attend` (default), `maybe`, or `decline`.
    #[serde(default = "default_intent")]
    pub intent: AdmissionIntent,
    /// Party size including the attendee. Informational only.
    #[serde(default = "default_guest_count")]
    #[validate(range(min = 1, message = "guest_count must be at least 1"))]
    pub guest_count: i32,
}

/// Request body for the track confirmation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmTrackRequest {
    pub track_id: TrackId,
    /// Acknowledge a mutual-exclusion conflict and switch out of the
    /// conflicting track.
    #[serde(default)]
    pub replace_existing: bool,
}

/// Request body for the waitlist endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitlistRequest {
    #[serde(default)]
    pub track_id: Option<TrackId>,
}

/// Request body for the activity RSVP endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRsvpRequest {
    pub status: RsvpStatus,
}

/// POST /api/v1/events/{event_id}/rsvp
///
/// Record the caller's admission intent for an event. Requires a complete
/// profile; tracked events park the RSVP in `pending` until a track is
/// confirmed.
pub async fn request_admission(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<RsvpRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let rsvp = state
        .admissions
        .request_admission(auth.user_id, event_id, input.intent, input.guest_count)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: rsvp })))
}

/// GET /api/v1/events/{event_id}/rsvp
///
/// The caller's RSVP for the event.
pub async fn get_rsvp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    let rsvp = state
        .admissions
        .rsvp_of(auth.user_id, event_id)
        .await?
        .ok_or(AppError::Admission(
            gather_core::error::AdmissionError::NotFound {
                entity: "rsvp",
                id: event_id,
            },
        ))?;
    Ok(Json(DataResponse { data: rsvp }))
}

/// POST /api/v1/events/{event_id}/rsvp/track
///
/// Confirm a track choice (or change tracks while attending). A full
/// track answers 409 `AT_CAPACITY` and leaves the RSVP unchanged; the
/// client may then offer the waitlist.
pub async fn confirm_track(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<ConfirmTrackRequest>,
) -> AppResult<impl IntoResponse> {
    let rsvp = state
        .admissions
        .confirm_track(auth.user_id, event_id, input.track_id, input.replace_existing)
        .await?;
    Ok(Json(DataResponse { data: rsvp }))
}

/// POST /api/v1/events/{event_id}/rsvp/waitlist
///
/// Join the waitlist, optionally for a specific track.
pub async fn join_waitlist(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<WaitlistRequest>,
) -> AppResult<impl IntoResponse> {
    let rsvp = state
        .admissions
        .join_waitlist(auth.user_id, event_id, input.track_id)
        .await?;
    Ok(Json(DataResponse { data: rsvp }))
}

/// DELETE /api/v1/events/{event_id}/rsvp
///
/// Cancel the caller's RSVP. Releases any held reservation; the row is
/// kept with status `not_attending`. Idempotent.
pub async fn cancel_rsvp(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    state.admissions.cancel(auth.user_id, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/activities/{activity_id}/rsvp
///
/// Upsert the caller's RSVP for a single activity. Independent of the
/// event-level RSVP and of capacity.
pub async fn rsvp_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(activity_id): Path<ActivityId>,
    Json(input): Json<ActivityRsvpRequest>,
) -> AppResult<impl IntoResponse> {
    let rsvp = state
        .admissions
        .rsvp_activity(auth.user_id, activity_id, input.status)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rsvp })))
}
