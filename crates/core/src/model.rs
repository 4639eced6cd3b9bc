//! Domain records shared by the store backends and the orchestrator.
//!
//! These are plain data: the Postgres store maps its rows into them, the
//! in-memory store holds them directly.

use serde::Serialize;

use crate::status::RsvpStatus;
use crate::types::{ActivityId, EventId, RsvpId, Timestamp, TrackGroupId, TrackId, UserId};

/// An event attendees RSVP to. Owns its tracks and track groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Maximum attendees; `None` means unlimited.
    pub capacity: Option<i32>,
    /// Currently reserved slots.
    pub occupancy: i32,
    /// Whether attendees must pick a track to confirm attendance.
    pub has_tracks: bool,
    pub starts_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A named set of tracks, optionally mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackGroup {
    pub id: TrackGroupId,
    pub event_id: EventId,
    pub name: String,
    /// When set, an attendee may hold at most one track in this group.
    pub is_mutually_exclusive: bool,
    /// Display order within the event.
    pub position: i32,
}

/// A sub-session of an event that attendees select among.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: TrackId,
    pub event_id: EventId,
    /// A track belongs to at most one group; ungrouped tracks combine
    /// freely with any other selection.
    pub group_id: Option<TrackGroupId>,
    pub name: String,
    pub capacity: Option<i32>,
    pub occupancy: i32,
    pub position: i32,
}

/// An attendee's RSVP for an event. Exactly one row per (user, event).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rsvp {
    pub id: RsvpId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub status: RsvpStatus,
    /// Informational; does not scale capacity consumption.
    pub guest_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A scheduled item inside an event, optionally assigned to a track.
/// Informational only -- activities are not capacity units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub name: String,
    pub position: i32,
}

/// An attendee's RSVP for a single activity, independent of the
/// event-level RSVP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRsvp {
    pub id: RsvpId,
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub status: RsvpStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Attendee profile fields the eligibility gate inspects.
///
/// All fields are optional at the storage level; the gate decides which
/// ones block admission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendeeProfile {
    pub user_id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub shirt_size: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub accessibility_needs: Option<String>,
    pub updated_at: Option<Timestamp>,
}
