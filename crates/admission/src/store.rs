//! The abstract transactional store the admission engine runs against.
//!
//! The engine never talks to a concrete database: every read and write
//! goes through [`AdmissionStore`]. The contract that matters is on
//! [`try_reserve`](AdmissionStore::try_reserve) -- it must be linearizable
//! per admission unit, so two concurrent reservations against the last
//! free slot can never both succeed. The PostgreSQL implementation keeps
//! that promise with a single conditional `UPDATE`; the in-memory one
//! with a store-wide mutex.

use async_trait::async_trait;

use gather_core::capacity::{AdmissionUnit, Occupancy};
use gather_core::error::AdmissionError;
use gather_core::model::{
    Activity, ActivityRsvp, AttendeeProfile, Event, Rsvp, Track, TrackGroup,
};
use gather_core::status::RsvpStatus;
use gather_core::types::{ActivityId, EventId, Timestamp, TrackGroupId, TrackId, UserId};

/// Fields for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub capacity: Option<i32>,
    pub has_tracks: bool,
    pub starts_at: Timestamp,
}

/// Fields for creating a track group under an event.
#[derive(Debug, Clone)]
pub struct NewTrackGroup {
    pub event_id: EventId,
    pub name: String,
    pub is_mutually_exclusive: bool,
    pub position: i32,
}

/// Fields for creating a track under an event.
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub event_id: EventId,
    pub group_id: Option<TrackGroupId>,
    pub name: String,
    pub capacity: Option<i32>,
    pub position: i32,
}

/// Fields for creating an activity under an event.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub name: String,
    pub position: i32,
}

/// The full desired state of an RSVP, upserted on the (user, event) key.
#[derive(Debug, Clone)]
pub struct RsvpDraft {
    pub user_id: UserId,
    pub event_id: EventId,
    pub track_id: Option<TrackId>,
    pub status: RsvpStatus,
    pub guest_count: i32,
}

/// Transactional persistence collaborator for the admission engine.
///
/// Implementations map their own failure type into
/// [`AdmissionError::Persistence`]; domain conditions (`AtCapacity`,
/// `NotFound`) are returned as their typed variants.
#[async_trait]
pub trait AdmissionStore: Send + Sync {
    /// Cheap reachability probe, used by the health endpoint.
    async fn ping(&self) -> Result<(), AdmissionError>;

    // -- topology -----------------------------------------------------------

    async fn create_event(&self, event: NewEvent) -> Result<Event, AdmissionError>;

    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, AdmissionError>;

    async fn create_track_group(
        &self,
        group: NewTrackGroup,
    ) -> Result<TrackGroup, AdmissionError>;

    async fn create_track(&self, track: NewTrack) -> Result<Track, AdmissionError>;

    async fn find_track(&self, track_id: TrackId) -> Result<Option<Track>, AdmissionError>;

    /// All tracks of an event, ordered by position.
    async fn tracks_of_event(&self, event_id: EventId) -> Result<Vec<Track>, AdmissionError>;

    /// All track groups of an event, ordered by position.
    async fn track_groups_of_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TrackGroup>, AdmissionError>;

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, AdmissionError>;

    async fn find_activity(
        &self,
        activity_id: ActivityId,
    ) -> Result<Option<Activity>, AdmissionError>;

    // -- RSVPs ---------------------------------------------------------------

    async fn find_rsvp(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Rsvp>, AdmissionError>;

    /// Insert or update the single RSVP row for `(draft.user_id,
    /// draft.event_id)`. Never creates a second row for the pair.
    async fn upsert_rsvp(&self, draft: RsvpDraft) -> Result<Rsvp, AdmissionError>;

    async fn upsert_activity_rsvp(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        status: RsvpStatus,
    ) -> Result<ActivityRsvp, AdmissionError>;

    // -- capacity ledger -----------------------------------------------------

    /// Atomically reserve `delta` slots on a unit.
    ///
    /// Returns `AtCapacity` when the unit exists but has no room, and
    /// `NotFound` when the unit does not exist. Concurrent calls against
    /// the same unit are serialized: when one slot remains, exactly one
    /// of two racing reservations succeeds.
    async fn try_reserve(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError>;

    /// Release `delta` slots on a unit. Never rejected; floors at zero.
    async fn release(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError>;

    /// Read-only occupancy snapshot for a unit.
    async fn occupancy_of(&self, unit: AdmissionUnit) -> Result<Occupancy, AdmissionError>;

    // -- profiles ------------------------------------------------------------

    async fn upsert_profile(
        &self,
        profile: AttendeeProfile,
    ) -> Result<AttendeeProfile, AdmissionError>;

    async fn find_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<AttendeeProfile>, AdmissionError>;
}
