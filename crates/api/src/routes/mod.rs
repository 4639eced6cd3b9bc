pub mod events;
pub mod health;
pub mod profile;
pub mod rsvp;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                 create, list
/// /events/{event_id}                      get
/// /events/{event_id}/track-groups         create, list
/// /events/{event_id}/tracks               create, list
/// /events/{event_id}/activities           create
/// /events/{event_id}/occupancy            occupancy snapshot
/// /tracks/{track_id}/occupancy            occupancy snapshot
///
/// /events/{event_id}/rsvp                 request, get, cancel
/// /events/{event_id}/rsvp/track           confirm / change track
/// /events/{event_id}/rsvp/waitlist        join waitlist
/// /activities/{activity_id}/rsvp          activity RSVP
///
/// /profile                                get, upsert
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(events::router())
        .merge(rsvp::router())
        .merge(profile::router())
}
