//! Row model for the `activities` table.

use sqlx::FromRow;

use gather_core::model::Activity;
use gather_core::types::{ActivityId, EventId, TrackId};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: ActivityId,
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub name: String,
    pub position: i32,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity {
            id: row.id,
            event_id: row.event_id,
            track_id: row.track_id,
            name: row.name,
            position: row.position,
        }
    }
}
