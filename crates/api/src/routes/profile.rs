//! Route definitions for attendee profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes, merged into `/api/v1`.
///
/// ```text
/// GET    /profile        get_profile
/// PUT    /profile        upsert_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(profile::get_profile).put(profile::upsert_profile),
    )
}
