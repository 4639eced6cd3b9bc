//! Route definitions for the attendee RSVP lifecycle.

use axum::routing::post;
use axum::Router;

use crate::handlers::rsvp;
use crate::state::AppState;

/// RSVP routes, merged into `/api/v1`.
///
/// ```text
/// POST   /events/{event_id}/rsvp              request_admission
/// GET    /events/{event_id}/rsvp              get_rsvp
/// DELETE /events/{event_id}/rsvp              cancel_rsvp
/// POST   /events/{event_id}/rsvp/track        confirm_track
/// POST   /events/{event_id}/rsvp/waitlist     join_waitlist
/// POST   /activities/{activity_id}/rsvp       rsvp_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{event_id}/rsvp",
            post(rsvp::request_admission)
                .get(rsvp::get_rsvp)
                .delete(rsvp::cancel_rsvp),
        )
        .route("/events/{event_id}/rsvp/track", post(rsvp::confirm_track))
        .route(
            "/events/{event_id}/rsvp/waitlist",
            post(rsvp::join_waitlist),
        )
        .route("/activities/{activity_id}/rsvp", post(rsvp::rsvp_activity))
}
