//! PostgreSQL implementation of the [`AdmissionStore`] trait.
//!
//! Thin mapping from the trait's contract onto the repositories. Database
//! failures become transient [`AdmissionError::Persistence`] values; the
//! ledger's reserved/full distinction is resolved with a follow-up
//! existence check, keeping the reservation itself a single statement.

use async_trait::async_trait;
use sqlx::PgPool;

use gather_admission::{
    AdmissionStore, NewActivity, NewEvent, NewTrack, NewTrackGroup, RsvpDraft,
};
use gather_core::capacity::{AdmissionUnit, Occupancy};
use gather_core::error::AdmissionError;
use gather_core::model::{
    Activity, ActivityRsvp, AttendeeProfile, Event, Rsvp, Track, TrackGroup,
};
use gather_core::status::RsvpStatus;
use gather_core::types::{ActivityId, EventId, TrackId, UserId};

use crate::repositories::{
    ActivityRepo, EventRepo, LedgerRepo, ProfileRepo, RsvpRepo, TrackRepo,
};

/// [`AdmissionStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn store_err(err: sqlx::Error) -> AdmissionError {
    AdmissionError::Persistence(err.to_string())
}

#[async_trait]
impl AdmissionStore for PgStore {
    async fn ping(&self) -> Result<(), AdmissionError> {
        crate::health_check(&self.pool).await.map_err(store_err)
    }

    // -- topology -----------------------------------------------------------

    async fn create_event(&self, event: NewEvent) -> Result<Event, AdmissionError> {
        let row = EventRepo::create(&self.pool, &event)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, AdmissionError> {
        let row = EventRepo::find_by_id(&self.pool, event_id)
            .await
            .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    async fn create_track_group(
        &self,
        group: NewTrackGroup,
    ) -> Result<TrackGroup, AdmissionError> {
        let row = TrackRepo::create_group(&self.pool, &group)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn create_track(&self, track: NewTrack) -> Result<Track, AdmissionError> {
        let row = TrackRepo::create(&self.pool, &track)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn find_track(&self, track_id: TrackId) -> Result<Option<Track>, AdmissionError> {
        let row = TrackRepo::find_by_id(&self.pool, track_id)
            .await
            .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    async fn tracks_of_event(&self, event_id: EventId) -> Result<Vec<Track>, AdmissionError> {
        let rows = TrackRepo::list_for_event(&self.pool, event_id)
            .await
            .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn track_groups_of_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TrackGroup>, AdmissionError> {
        let rows = TrackRepo::list_groups_for_event(&self.pool, event_id)
            .await
            .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, AdmissionError> {
        let row = ActivityRepo::create(&self.pool, &activity)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn find_activity(
        &self,
        activity_id: ActivityId,
    ) -> Result<Option<Activity>, AdmissionError> {
        let row = ActivityRepo::find_by_id(&self.pool, activity_id)
            .await
            .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    // -- RSVPs ---------------------------------------------------------------

    async fn find_rsvp(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Rsvp>, AdmissionError> {
        let row = RsvpRepo::find(&self.pool, user_id, event_id)
            .await
            .map_err(store_err)?;
        row.map(|r| r.into_domain()).transpose()
    }

    async fn upsert_rsvp(&self, draft: RsvpDraft) -> Result<Rsvp, AdmissionError> {
        let row = RsvpRepo::upsert(&self.pool, &draft)
            .await
            .map_err(store_err)?;
        row.into_domain()
    }

    async fn upsert_activity_rsvp(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        status: RsvpStatus,
    ) -> Result<ActivityRsvp, AdmissionError> {
        let row = RsvpRepo::upsert_activity(&self.pool, user_id, activity_id, status)
            .await
            .map_err(store_err)?;
        row.into_domain()
    }

    // -- capacity ledger -----------------------------------------------------

    async fn try_reserve(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError> {
        let reserved = LedgerRepo::try_reserve(&self.pool, unit, delta)
            .await
            .map_err(store_err)?;
        if reserved {
            return Ok(());
        }

        // Zero rows affected: either the unit is full or it is missing.
        match LedgerRepo::occupancy_of(&self.pool, unit)
            .await
            .map_err(store_err)?
        {
            Some(_) => Err(AdmissionError::AtCapacity { unit }),
            None => Err(AdmissionError::NotFound {
                entity: unit.entity(),
                id: unit.id(),
            }),
        }
    }

    async fn release(&self, unit: AdmissionUnit, delta: i32) -> Result<(), AdmissionError> {
        LedgerRepo::release(&self.pool, unit, delta)
            .await
            .map_err(store_err)
    }

    async fn occupancy_of(&self, unit: AdmissionUnit) -> Result<Occupancy, AdmissionError> {
        LedgerRepo::occupancy_of(&self.pool, unit)
            .await
            .map_err(store_err)?
            .ok_or(AdmissionError::NotFound {
                entity: unit.entity(),
                id: unit.id(),
            })
    }

    // -- profiles ------------------------------------------------------------

    async fn upsert_profile(
        &self,
        profile: AttendeeProfile,
    ) -> Result<AttendeeProfile, AdmissionError> {
        let row = ProfileRepo::upsert(&self.pool, &profile)
            .await
            .map_err(store_err)?;
        Ok(row.into())
    }

    async fn find_profile(
        &self,
        user_id: UserId,
    ) -> Result<Option<AttendeeProfile>, AdmissionError> {
        let row = ProfileRepo::find(&self.pool, user_id)
            .await
            .map_err(store_err)?;
        Ok(row.map(Into::into))
    }
}
