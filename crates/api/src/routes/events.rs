//! Route definitions for the organizer surface: events, track groups,
//! tracks, activities, and occupancy display.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{events, occupancy};
use crate::state::AppState;

/// Organizer and occupancy routes, merged into `/api/v1`.
///
/// ```text
/// POST   /events                              create_event
/// GET    /events/{event_id}                   get_event
/// POST   /events/{event_id}/track-groups      create_track_group
/// GET    /events/{event_id}/track-groups      list_track_groups
/// POST   /events/{event_id}/tracks            create_track
/// GET    /events/{event_id}/tracks            list_tracks
/// POST   /events/{event_id}/activities        create_activity
/// GET    /events/{event_id}/occupancy         event_occupancy
/// GET    /tracks/{track_id}/occupancy         track_occupancy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", post(events::create_event))
        .route("/events/{event_id}", get(events::get_event))
        .route(
            "/events/{event_id}/track-groups",
            post(events::create_track_group).get(events::list_track_groups),
        )
        .route(
            "/events/{event_id}/tracks",
            post(events::create_track).get(events::list_tracks),
        )
        .route(
            "/events/{event_id}/activities",
            post(events::create_activity),
        )
        .route(
            "/events/{event_id}/occupancy",
            get(occupancy::event_occupancy),
        )
        .route(
            "/tracks/{track_id}/occupancy",
            get(occupancy::track_occupancy),
        )
}
