//! Shared fixtures for the admission integration tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use gather_admission::{
    Admissions, AdmissionStore, MemoryStore, NewEvent, NewTrack, NewTrackGroup, RetryPolicy,
    StoreProfileDirectory,
};
use gather_core::model::{AttendeeProfile, Event, Track, TrackGroup};
use gather_core::types::{EventId, TrackGroupId, UserId};
use gather_events::NotificationBus;

/// Build an orchestrator over the given store with test-friendly retry
/// delays.
pub fn admissions(store: Arc<MemoryStore>) -> Admissions {
    admissions_with_bus(store, Arc::new(NotificationBus::default()))
}

pub fn admissions_with_bus(store: Arc<MemoryStore>, bus: Arc<NotificationBus>) -> Admissions {
    let profiles = Arc::new(StoreProfileDirectory::new(store.clone()));
    Admissions::new(store, profiles, bus).with_retry(RetryPolicy {
        max_retries: 2,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        multiplier: 2.0,
    })
}

/// Store a complete profile so the eligibility gate passes.
pub async fn seed_profile(store: &MemoryStore, user_id: UserId) {
    store
        .upsert_profile(AttendeeProfile {
            user_id,
            first_name: Some("Test".into()),
            last_name: Some("Attendee".into()),
            phone: Some("+1 555 0100".into()),
            email: Some("attendee@example.com".into()),
            shirt_size: Some("M".into()),
            dietary_restrictions: Some("none".into()),
            accessibility_needs: Some("none".into()),
            updated_at: None,
        })
        .await
        .expect("seed profile");
}

pub async fn seed_user(store: &MemoryStore) -> UserId {
    let user_id = Uuid::new_v4();
    seed_profile(store, user_id).await;
    user_id
}

pub async fn create_event(store: &MemoryStore, capacity: Option<i32>, has_tracks: bool) -> Event {
    store
        .create_event(NewEvent {
            name: "GatherConf".into(),
            capacity,
            has_tracks,
            starts_at: Utc::now(),
        })
        .await
        .expect("create event")
}

pub async fn create_group(store: &MemoryStore, event_id: EventId, exclusive: bool) -> TrackGroup {
    store
        .create_track_group(NewTrackGroup {
            event_id,
            name: "Morning Sessions".into(),
            is_mutually_exclusive: exclusive,
            position: 0,
        })
        .await
        .expect("create group")
}

pub async fn create_track(
    store: &MemoryStore,
    event_id: EventId,
    group_id: Option<TrackGroupId>,
    name: &str,
    capacity: Option<i32>,
) -> Track {
    store
        .create_track(NewTrack {
            event_id,
            group_id,
            name: name.into(),
            capacity,
            position: 0,
        })
        .await
        .expect("create track")
}
