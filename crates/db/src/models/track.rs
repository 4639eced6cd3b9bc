//! Row models for the `tracks` and `track_groups` tables.

use sqlx::FromRow;

use gather_core::model::{Track, TrackGroup};
use gather_core::types::{EventId, TrackGroupId, TrackId};

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TrackRow {
    pub id: TrackId,
    pub event_id: EventId,
    pub group_id: Option<TrackGroupId>,
    pub name: String,
    pub capacity: Option<i32>,
    pub occupancy: i32,
    pub position: i32,
}

impl From<TrackRow> for Track {
    fn from(row: TrackRow) -> Self {
        Track {
            id: row.id,
            event_id: row.event_id,
            group_id: row.group_id,
            name: row.name,
            capacity: row.capacity,
            occupancy: row.occupancy,
            position: row.position,
        }
    }
}

/// A row from the `track_groups` table.
#[derive(Debug, Clone, FromRow)]
pub struct TrackGroupRow {
    pub id: TrackGroupId,
    pub event_id: EventId,
    pub name: String,
    pub is_mutually_exclusive: bool,
    pub position: i32,
}

impl From<TrackGroupRow> for TrackGroup {
    fn from(row: TrackGroupRow) -> Self {
        TrackGroup {
            id: row.id,
            event_id: row.event_id,
            name: row.name,
            is_mutually_exclusive: row.is_mutually_exclusive,
            position: row.position,
        }
    }
}
