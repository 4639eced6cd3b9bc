//! In-memory [`AdmissionStore`] used by tests and local development.
//!
//! A single store-wide mutex serializes every operation, which trivially
//! gives `try_reserve` the per-unit linearizability the trait demands.
//! Nothing here is optimized; the production store is `gather-db`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use gather_core::capacity::{AdmissionUnit, Occupancy};
use gather_core::error::AdmissionError;
use gather_core::model::{
    Activity, ActivityRsvp, AttendeeProfile, Event, Rsvp, Track, TrackGroup,
};
use gather_core::status::RsvpStatus;
use gather_core::types::{ActivityId, EventId, TrackGroupId, TrackId, UserId};

use crate::store::{AdmissionStore, NewActivity, NewEvent, NewTrack, NewTrackGroup, RsvpDraft};

#[derive(Default)]
struct Inner {
    events: HashMap<EventId, Event>,
    groups: HashMap<TrackGroupId, TrackGroup>,
    tracks: HashMap<TrackId, Track>,
    activities: HashMap<ActivityId, Activity>,
    rsvps: HashMap<(UserId, EventId), Rsvp>,
    activity_rsvps: HashMap<(UserId, ActivityId), ActivityRsvp>,
    profiles: HashMap<UserId, AttendeeProfile>,
}

/// Mutex-serialized in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Number of upcoming RSVP writes that should fail with a transient
    /// persistence error. Lets tests exercise the retry and compensation
    /// paths.
    fail_rsvp_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` calls to `upsert_rsvp` fail transiently.
    pub fn fail_next_rsvp_writes(&self, count: usize) {
        self.fail_rsvp_writes.store(count, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AdmissionStore for MemoryStore {
    async fn ping(&self) -> Result<(), AdmissionError> {
        Ok(())
    }

    // -- topology -----------------------------------------------------------

    async fn create_event(&self, event: NewEvent) -> Result<Event, AdmissionError> {
        let now = Utc::now();
        let created = Event {
            id: Uuid::new_v4(),
            name: event.name,
            capacity: event.capacity,
            occupancy: 0,
            has_tracks: event.has_tracks,
            starts_at: event.starts_at,
            created_at: now,
            updated_at: now,
        };
        self.lock().events.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, AdmissionError> {
        Ok(self.lock().events.get(&event_id).cloned())
    }

    async fn create_track_group(
        &self,
        group: NewTrackGroup,
    ) -> Result<TrackGroup, AdmissionError> {
        let mut inner = self.lock();
        if !inner.events.contains_key(&group.event_id) {
            return Err(AdmissionError::NotFound {
                entity: "event",
                id: group.event_id,
            });
        }
        let created = TrackGroup {
            id: Uuid::new_v4(),
            event_id: group.event_id,
            name: group.name,
            is_mutually_exclusive: group.is_mutually_exclusive,
            position: group.position,
        };
        inner.groups.insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_track(&self, track: NewTrack) -> Result<Track, AdmissionError> {
        let mut inner = self.lock();
        if !inner.events.contains_key(&track.event_id) {
            return Err(AdmissionError::NotFound {
                entity: "event",
                id: track.event_id,
            });
        }
        if let Some(group_id) = track.group_id {
            if !inner.groups.contains_key(&group_id) {
                return Err(AdmissionError::NotFound {
                    entity: "track group",
                    id: group_id,
                });
            }
        }
        let created = Track {
            id: Uuid::new_v4(),
            event_id: track.event_id,
            group_id: track.group_id,
            name: track.name,
            capacity: track.capacity,
            occupancy: 0,
            position: track.position,
        };
        inner.tracks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_track(&self, track_id: TrackId) -> Result<Option<Track>, AdmissionError> {
        Ok(self.lock().tracks.get(&track_id).cloned())
    }

    async fn tracks_of_event(&self, event_id: EventId) -> Result<Vec<Track>, AdmissionError> {
        let mut tracks: Vec<Track> = self
            .lock()
            .tracks
            .values()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect();
        tracks.sort_by_key(|t| t.position);
        Ok(tracks)
    }

    async fn track_groups_of_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TrackGroup>, AdmissionError> {
        let mut groups: Vec<TrackGroup> = self
            .lock()
            .groups
            .values()
            .filter(|g| g.event_id == event_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.position);
        Ok(groups)
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, AdmissionError> {
        let mut inner = self.lock();
        if !inner.events.contains_key(&activity.event_id) {
            return Err(AdmissionError::NotFound {
                entity: "event",
                id: activity.event_id,
            });
        }
        let created = Activity {
            id: Uuid::new_v4(),
            event_id: activity.event_id,
            track_id: activity.track_id,
            name: activity.name,
            position: activity.position,
        };
        inner.activities.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_activity(
        &self,
        activity_id: ActivityId,
    ) -> Result<Option<Activity>, AdmissionError> {
        Ok(self.lock().activities.get(&activity_id).cloned())
    }

    // -- RSVPs ---------------------------------------------------------------

    async fn find_rsvp(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Rsvp>, AdmissionError> {
        Ok(self.lock().rsvps.get(&(user_id, event_id)).cloned())
    }

    async fn upsert_rsvp(&self, draft: RsvpDraft) -> Result<Rsvp, AdmissionError> {
        if self
            .fail_rsvp_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AdmissionError::Persistence(
                "injected rsvp write failure".into(),
            ));
        }

        let now = Utc::now();
        let mut inner = self.lock();
        let key = (draft.user_id, draft.event_id);
        let rsvp = match inner.rsvps.get_mut(&key) {
            Some(existing) => {
                existing.status = draft.status;
                existing.track_id = draft.track_id;
                existing.guest_count = draft.guest_count;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = Rsvp {
                    id: Uuid::new_v4(),
                    user_id: draft.user_id,
                    event_id: draft.event_id,
                    track_id: draft.track_id,
                    status: draft.status,
                    guest_count: draft.guest_count,
                    created_at: now,
                    updated_at: now,
                };
                inner.rsvps.insert(key, created.clone());
                created
            }
        };
        Ok(rsvp)
    }

    async fn upsert_activity_rsvp(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        status: RsvpStatus,
    ) -> Result<ActivityRsvp, AdmissionError> {
        let now = Utc::now();
        let mut inner = self.lock();
        let key = (user_id, activity_id);
        let rsvp = match inner.activity_rsvps.get_mut(&key) {
            Some(existing) => {
                existing.status = status;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = ActivityRsvp {
                    id: Uuid::new_v4(),
                    user_id,
                    activity_id,
                    status,
                    created_at: now,
                    updated_at: now,
                };
                inner.activity_rsvps.insert(key, created.clone());
                created
            }
        };
        Ok(rsvp)
    }

    // -- capacity ledger -----------------------------------------------------

    async fn try_reserve(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError> {
        let mut inner = self.lock();
        let occupancy = match unit {
            AdmissionUnit::Event(id) => {
                let event = inner.events.get(&id).ok_or(AdmissionError::NotFound {
                    entity: "event",
                    id,
                })?;
                Occupancy {
                    current: event.occupancy,
                    max: event.capacity,
                }
            }
            AdmissionUnit::Track(id) => {
                let track = inner.tracks.get(&id).ok_or(AdmissionError::NotFound {
                    entity: "track",
                    id,
                })?;
                Occupancy {
                    current: track.occupancy,
                    max: track.capacity,
                }
            }
        };

        let next = occupancy
            .admit(delta)
            .ok_or(AdmissionError::AtCapacity { unit })?;

        match unit {
            AdmissionUnit::Event(id) => {
                if let Some(event) = inner.events.get_mut(&id) {
                    event.occupancy = next;
                }
            }
            AdmissionUnit::Track(id) => {
                if let Some(track) = inner.tracks.get_mut(&id) {
                    track.occupancy = next;
                }
            }
        }
        Ok(())
    }

    async fn release(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError> {
        let mut inner = self.lock();
        match unit {
            AdmissionUnit::Event(id) => {
                if let Some(event) = inner.events.get_mut(&id) {
                    let occ = Occupancy {
                        current: event.occupancy,
                        max: event.capacity,
                    };
                    event.occupancy = occ.release(delta);
                }
            }
            AdmissionUnit::Track(id) => {
                if let Some(track) = inner.tracks.get_mut(&id) {
                    let occ = Occupancy {
                        current: track.occupancy,
                        max: track.capacity,
                    };
                    track.occupancy = occ.release(delta);
                }
            }
        }
        Ok(())
    }

    async fn occupancy_of(&self, unit: AdmissionUnit) -> Result<Occupancy, AdmissionError> {
        let inner = self.lock();
        match unit {
            AdmissionUnit::Event(id) => inner
                .events
                .get(&id)
                .map(|e| Occupancy {
                    current: e.occupancy,
                    max: e.capacity,
                })
                .ok_or(AdmissionError::NotFound {
                    entity: "event",
                    id,
                }),
            AdmissionUnit::Track(id) => inner
                .tracks
                .get(&id)
                .map(|t| Occupancy {
                    current: t.occupancy,
                    max: t.capacity,
                })
                .ok_or(AdmissionError::NotFound {
                    entity: "track",
                    id,
                }),
        }
    }

    // -- profiles ------------------------------------------------------------

    async fn upsert_profile(
        &self,
        profile: AttendeeProfile,
    ) -> Result<AttendeeProfile, AdmissionError> {
        let mut stored = profile;
        stored.updated_at = Some(Utc::now());
        self.lock().profiles.insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn find_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<AttendeeProfile>, AdmissionError> {
        Ok(self.lock().profiles.get(&user_id).cloned())
    }
}
