//! Row models for the `rsvps` and `activity_rsvps` tables.
//!
//! Status is stored as text; converting a row into its domain record
//! parses it and treats an unknown value as a persistence failure rather
//! than panicking.

use sqlx::FromRow;

use gather_core::error::AdmissionError;
use gather_core::model::{ActivityRsvp, Rsvp};
use gather_core::status::RsvpStatus;
use gather_core::types::{ActivityId, EventId, RsvpId, Timestamp, TrackId, UserId};

/// A row from the `rsvps` table.
#[derive(Debug, Clone, FromRow)]
pub struct RsvpRow {
    pub id: RsvpId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub status: String,
    pub guest_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RsvpRow {
    pub fn into_domain(self) -> Result<Rsvp, AdmissionError> {
        let status = parse_status(&self.status)?;
        Ok(Rsvp {
            id: self.id,
            user_id: self.user_id,
            event_id: self.event_id,
            track_id: self.track_id,
            status,
            guest_count: self.guest_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A row from the `activity_rsvps` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRsvpRow {
    pub id: RsvpId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActivityRsvpRow {
    pub fn into_domain(self) -> Result<ActivityRsvp, AdmissionError> {
        let status = parse_status(&self.status)?;
        Ok(ActivityRsvp {
            id: self.id,
            user_id: self.user_id,
            activity_id: self.activity_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<RsvpStatus, AdmissionError> {
    RsvpStatus::parse(raw).ok_or_else(|| {
        AdmissionError::Persistence(format!("unknown rsvp status in database: '{raw}'"))
    })
}
