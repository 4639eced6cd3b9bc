//! Repository for the `tracks` and `track_groups` tables.

use sqlx::PgPool;

use gather_admission::{NewTrack, NewTrackGroup};
use gather_core::types::{EventId, TrackId};

use crate::models::track::{TrackGroupRow, TrackRow};

/// Column list for tracks queries.
const TRACK_COLUMNS: &str = "id, event_id, group_id, name, capacity, occupancy, position";

/// Column list for track_groups queries.
const GROUP_COLUMNS: &str = "id, event_id, name, is_mutually_exclusive, position";

/// Provides CRUD operations for tracks and track groups.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewTrack) -> Result<TrackRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (event_id, group_id, name, capacity, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TRACK_COLUMNS}"
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(input.event_id)
            .bind(input.group_id)
            .bind(&input.name)
            .bind(input.capacity)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: TrackId,
    ) -> Result<Option<TrackRow>, sqlx::Error> {
        let query = format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tracks of an event, ordered by position ascending.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: EventId,
    ) -> Result<Vec<TrackRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TRACK_COLUMNS} FROM tracks
             WHERE event_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new track group, returning the created row.
    pub async fn create_group(
        pool: &PgPool,
        input: &NewTrackGroup,
    ) -> Result<TrackGroupRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO track_groups (event_id, name, is_mutually_exclusive, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, TrackGroupRow>(&query)
            .bind(input.event_id)
            .bind(&input.name)
            .bind(input.is_mutually_exclusive)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// List all track groups of an event, ordered by position ascending.
    pub async fn list_groups_for_event(
        pool: &PgPool,
        event_id: EventId,
    ) -> Result<Vec<TrackGroupRow>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM track_groups
             WHERE event_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, TrackGroupRow>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
