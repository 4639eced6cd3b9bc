//! Repository for the `rsvps` and `activity_rsvps` tables.

use sqlx::PgPool;

use gather_admission::RsvpDraft;
use gather_core::status::RsvpStatus;
use gather_core::types::{ActivityId, EventId, UserId};

use crate::models::rsvp::{ActivityRsvpRow, RsvpRow};

/// Column list for rsvps queries.
const RSVP_COLUMNS: &str =
    "id, user_id, event_id, track_id, status, guest_count, created_at, updated_at";

/// Column list for activity_rsvps queries.
const ACTIVITY_RSVP_COLUMNS: &str =
    "id, user_id, activity_id, status, created_at, updated_at";

/// Provides upsert and lookup operations for RSVPs.
pub struct RsvpRepo;

impl RsvpRepo {
    /// Find the RSVP for a (user, event) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<RsvpRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps
             WHERE user_id = $1 AND event_id = $2"
        );
        sqlx::query_as::<_, RsvpRow>(&query)
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the RSVP row for the draft's (user, event) pair.
    ///
    /// The unique constraint on (user_id, event_id) makes this the only
    /// write path: a repeat request updates in place and can never create
    /// a second row.
    pub async fn upsert(pool: &PgPool, draft: &RsvpDraft) -> Result<RsvpRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO rsvps (user_id, event_id, track_id, status, guest_count)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, event_id) DO UPDATE SET
                track_id = EXCLUDED.track_id,
                status = EXCLUDED.status,
                guest_count = EXCLUDED.guest_count,
                updated_at = now()
             RETURNING {RSVP_COLUMNS}"
        );
        sqlx::query_as::<_, RsvpRow>(&query)
            .bind(draft.user_id)
            .bind(draft.event_id)
            .bind(draft.track_id)
            .bind(draft.status.as_str())
            .bind(draft.guest_count)
            .fetch_one(pool)
            .await
    }

    /// Insert or update an activity-level RSVP.
    pub async fn upsert_activity(
        pool: &PgPool,
        user_id: UserId,
        activity_id: ActivityId,
        status: RsvpStatus,
    ) -> Result<ActivityRsvpRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_rsvps (user_id, activity_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, activity_id) DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = now()
             RETURNING {ACTIVITY_RSVP_COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRsvpRow>(&query)
            .bind(user_id)
            .bind(activity_id)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }
}
