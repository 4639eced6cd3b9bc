//! Organizer handlers: create and list events, track groups, tracks, and
//! activities.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use gather_admission::{NewActivity, NewEvent, NewTrack, NewTrackGroup};
use gather_core::error::AdmissionError;
use gather_core::types::{EventId, Timestamp, TrackGroupId, TrackId};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Maximum attendees; omit for unlimited.
    #[serde(default)]
    #[validate(range(min = 0, message = "capacity must not be negative"))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub has_tracks: bool,
    pub starts_at: Timestamp,
}

/// Request body for creating a track group.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrackGroupRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub is_mutually_exclusive: bool,
    #[serde(default)]
    pub position: i32,
}

/// Request body for creating a track.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrackRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub group_id: Option<TrackGroupId>,
    #[serde(default)]
    #[validate(range(min = 0, message = "capacity must not be negative"))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub position: i32,
}

/// Request body for creating an activity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub track_id: Option<TrackId>,
    #[serde(default)]
    pub position: i32,
}

/// POST /api/v1/events
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let event = state
        .store
        .create_event(NewEvent {
            name: input.name,
            capacity: input.capacity,
            has_tracks: input.has_tracks,
            starts_at: input.starts_at,
        })
        .await?;

    tracing::info!(user_id = %auth.user_id, event_id = %event.id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events/{event_id}
pub async fn get_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    let event = state
        .store
        .find_event(event_id)
        .await?
        .ok_or(AppError::Admission(AdmissionError::NotFound {
            entity: "event",
            id: event_id,
        }))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/events/{event_id}/track-groups
pub async fn create_track_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<CreateTrackGroupRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_event_exists(&state, event_id).await?;

    let group = state
        .store
        .create_track_group(NewTrackGroup {
            event_id,
            name: input.name,
            is_mutually_exclusive: input.is_mutually_exclusive,
            position: input.position,
        })
        .await?;

    tracing::info!(user_id = %auth.user_id, event_id = %event_id, group_id = %group.id, "Track group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// POST /api/v1/events/{event_id}/tracks
pub async fn create_track(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<CreateTrackRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_event_exists(&state, event_id).await?;

    let track = state
        .store
        .create_track(NewTrack {
            event_id,
            group_id: input.group_id,
            name: input.name,
            capacity: input.capacity,
            position: input.position,
        })
        .await?;

    tracing::info!(user_id = %auth.user_id, event_id = %event_id, track_id = %track.id, "Track created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// GET /api/v1/events/{event_id}/tracks
pub async fn list_tracks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state, event_id).await?;
    let tracks = state.store.tracks_of_event(event_id).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// GET /api/v1/events/{event_id}/track-groups
pub async fn list_track_groups(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state, event_id).await?;
    let groups = state.store.track_groups_of_event(event_id).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/events/{event_id}/activities
pub async fn create_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(input): Json<CreateActivityRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_event_exists(&state, event_id).await?;

    let activity = state
        .store
        .create_activity(NewActivity {
            event_id,
            track_id: input.track_id,
            name: input.name,
            position: input.position,
        })
        .await?;

    tracing::info!(user_id = %auth.user_id, event_id = %event_id, activity_id = %activity.id, "Activity created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

async fn ensure_event_exists(state: &AppState, event_id: EventId) -> Result<(), AppError> {
    state
        .store
        .find_event(event_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Admission(AdmissionError::NotFound {
            entity: "event",
            id: event_id,
        }))
}
