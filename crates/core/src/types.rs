//! Shared identifier and timestamp aliases.

use uuid::Uuid;

/// All public identifiers are opaque UUIDs.
pub type UserId = Uuid;
pub type EventId = Uuid;
pub type TrackGroupId = Uuid;
pub type TrackId = Uuid;
pub type ActivityId = Uuid;
pub type RsvpId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
