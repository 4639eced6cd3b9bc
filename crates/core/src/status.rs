//! The RSVP status enum.
//!
//! One tagged union consumed everywhere -- handlers, orchestrator, and the
//! store all match on this type, so a new status is a compile error at
//! every call site until handled.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an attendee's RSVP for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    /// Admission requested on a tracked event; track choice still pending.
    /// Holds no reservation.
    Pending,
    /// Confirmed attendance. The only status that holds capacity.
    Attending,
    /// Wanted a full track; holds no reservation.
    Waitlist,
    /// Tentative interest. Holds no reservation.
    Maybe,
    /// Cancelled or declined. The row is kept (soft status, never deleted).
    NotAttending,
}

impl RsvpStatus {
    /// The wire/database string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Attending => "attending",
            RsvpStatus::Waitlist => "waitlist",
            RsvpStatus::Maybe => "maybe",
            RsvpStatus::NotAttending => "not_attending",
        }
    }

    /// Parse a wire/database string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RsvpStatus::Pending),
            "attending" => Some(RsvpStatus::Attending),
            "waitlist" => Some(RsvpStatus::Waitlist),
            "maybe" => Some(RsvpStatus::Maybe),
            "not_attending" => Some(RsvpStatus::NotAttending),
            _ => None,
        }
    }

    /// Whether this status holds a capacity reservation.
    pub fn holds_reservation(self) -> bool {
        matches!(self, RsvpStatus::Attending)
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
