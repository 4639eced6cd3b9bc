//! Repository for the `activities` table.

use sqlx::PgPool;

use gather_admission::NewActivity;
use gather_core::types::{ActivityId, EventId};

use crate::models::activity::ActivityRow;

/// Column list for activities queries.
const ACTIVITY_COLUMNS: &str = "id, event_id, track_id, name, position";

/// Provides CRUD operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewActivity) -> Result<ActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (event_id, track_id, name, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(input.event_id)
            .bind(input.track_id)
            .bind(&input.name)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Find an activity by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ActivityId,
    ) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all activities of an event, ordered by position ascending.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: EventId,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities
             WHERE event_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
