//! Row model for the `events` table.

use sqlx::FromRow;

use gather_core::model::Event;
use gather_core::types::{EventId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: EventId,
    pub name: String,
    pub capacity: Option<i32>,
    pub occupancy: i32,
    pub has_tracks: bool,
    pub starts_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            name: row.name,
            capacity: row.capacity,
            occupancy: row.occupancy,
            has_tracks: row.has_tracks,
            starts_at: row.starts_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
