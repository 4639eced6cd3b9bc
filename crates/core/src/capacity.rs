//! Capacity accounting rules.
//!
//! Every ledger backend (the in-memory store and the Postgres store)
//! enforces the same rule: a reservation of `delta` slots succeeds iff
//! `occupancy + delta <= capacity`, where a missing capacity means
//! unlimited. Releases floor at zero and are never rejected.

use serde::Serialize;

use crate::types::{EventId, TrackId};

/// The granularity at which capacity is tracked: an event or a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionUnit {
    Event(EventId),
    Track(TrackId),
}

impl AdmissionUnit {
    /// The entity name used in errors and log fields.
    pub fn entity(self) -> &'static str {
        match self {
            AdmissionUnit::Event(_) => "event",
            AdmissionUnit::Track(_) => "track",
        }
    }

    pub fn id(self) -> uuid::Uuid {
        match self {
            AdmissionUnit::Event(id) | AdmissionUnit::Track(id) => id,
        }
    }
}

impl std::fmt::Display for AdmissionUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.entity(), self.id())
    }
}

/// Point-in-time occupancy snapshot for an admission unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    /// Currently occupied slots.
    pub current: i32,
    /// Maximum slots; `None` means unlimited.
    pub max: Option<i32>,
}

impl Occupancy {
    /// Occupancy after admitting `delta` more attendees, or `None` when
    /// the unit does not have room.
    pub fn admit(self, delta: i32) -> Option<i32> {
        match self.max {
            Some(cap) if self.current + delta > cap => None,
            _ => Some(self.current + delta),
        }
    }

    /// Occupancy after releasing `delta` slots. Floors at zero.
    pub fn release(self, delta: i32) -> i32 {
        (self.current - delta).max(0)
    }

    /// Whether at least one more attendee fits.
    pub fn has_room(self) -> bool {
        self.admit(1).is_some()
    }
}
