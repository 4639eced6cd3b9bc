//! Repository for the `events` table.

use sqlx::PgPool;

use gather_admission::NewEvent;
use gather_core::types::EventId;

use crate::models::event::EventRow;

/// Column list for events queries.
const EVENT_COLUMNS: &str =
    "id, name, capacity, occupancy, has_tracks, starts_at, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewEvent) -> Result<EventRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (name, capacity, has_tracks, starts_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(&input.name)
            .bind(input.capacity)
            .bind(input.has_tracks)
            .bind(input.starts_at)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EventId,
    ) -> Result<Option<EventRow>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events ordered by start time ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<EventRow>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY starts_at ASC");
        sqlx::query_as::<_, EventRow>(&query).fetch_all(pool).await
    }
}
