//! The admission orchestrator: sequences eligibility, track resolution,
//! and capacity reservation into atomic operations.
//!
//! Ordering rules it enforces:
//!
//! - reservations happen before the RSVP write; if the write ultimately
//!   fails, the reservation is released (compensation) before the error
//!   surfaces, so a reservation is never held without a persisted RSVP;
//! - cancellation releases held reservations first and writes the status
//!   second, so a crash in between can only under-count occupancy, never
//!   strand a slot;
//! - a track change reserves the new track before releasing the old one,
//!   so a failure can only leave the attendee with their original seat.
//!
//! Every store write is retried with exponential backoff while the
//! failure is transient; domain rejections surface immediately.

use std::collections::HashSet;
use std::sync::Arc;

use gather_core::capacity::{AdmissionUnit, Occupancy};
use gather_core::error::AdmissionError;
use gather_core::model::{ActivityRsvp, Rsvp};
use gather_core::status::RsvpStatus;
use gather_core::track_groups;
use gather_core::transitions::{self, AdmissionIntent, ConfirmKind};
use gather_core::types::{ActivityId, EventId, TrackId, UserId};
use gather_events::{bus, Notification, NotificationBus};

use crate::profile::ProfileDirectory;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::store::{AdmissionStore, RsvpDraft};

/// Public entry point for RSVP and track admission.
pub struct Admissions {
    store: Arc<dyn AdmissionStore>,
    profiles: Arc<dyn ProfileDirectory>,
    bus: Arc<NotificationBus>,
    retry: RetryPolicy,
}

impl Admissions {
    pub fn new(
        store: Arc<dyn AdmissionStore>,
        profiles: Arc<dyn ProfileDirectory>,
        bus: Arc<NotificationBus>,
    ) -> Self {
        Self {
            store,
            profiles,
            bus,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy (tests use short delays).
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // -- public operations ---------------------------------------------------

    /// Record an attendee's intent for an event.
    ///
    /// Tracked events park the RSVP in `pending` until a track is
    /// confirmed; untracked events admit directly against the event unit.
    /// Upserts on (user, event): repeating a request is idempotent.
    pub async fn request_admission(
        &self,
        user_id: UserId,
        event_id: EventId,
        intent: AdmissionIntent,
        guest_count: i32,
    ) -> Result<Rsvp, AdmissionError> {
        let event = self.require_event(event_id).await?;
        self.check_eligibility(user_id).await?;

        let current = self.store.find_rsvp(user_id, event_id).await?;
        let previous_status = current.as_ref().map(|r| r.status);
        let outcome = transitions::on_request(previous_status, event.has_tracks, intent)?;

        if outcome.release_held {
            if let Some(rsvp) = &current {
                self.release_held_units(rsvp).await?;
            }
        }

        if outcome.reserve_event {
            self.store
                .try_reserve(AdmissionUnit::Event(event_id), 1)
                .await?;
        }

        let track_id = match outcome.status {
            RsvpStatus::Pending | RsvpStatus::Maybe => None,
            _ => current.as_ref().and_then(|r| r.track_id),
        };
        let guest_count = match intent {
            AdmissionIntent::Decline => {
                current.as_ref().map(|r| r.guest_count).unwrap_or(guest_count)
            }
            _ => guest_count,
        };

        let draft = RsvpDraft {
            user_id,
            event_id,
            track_id,
            status: outcome.status,
            guest_count,
        };
        let persisted = match self.persist(draft).await {
            Ok(rsvp) => rsvp,
            Err(err) => {
                if outcome.reserve_event {
                    self.compensate(AdmissionUnit::Event(event_id)).await;
                }
                return Err(err);
            }
        };

        tracing::info!(
            user_id = %user_id,
            event_id = %event_id,
            status = %persisted.status,
            "admission requested"
        );
        self.notify_transition(previous_status, &persisted);
        Ok(persisted)
    }

    /// Confirm a track choice, or change tracks while attending.
    ///
    /// `replace_existing` acknowledges a mutual-exclusion conflict and
    /// switches out of the conflicting track instead of rejecting.
    ///
    /// A full track rejects with `AtCapacity` and leaves the RSVP exactly
    /// as it was -- the caller decides whether to offer the waitlist.
    pub async fn confirm_track(
        &self,
        user_id: UserId,
        event_id: EventId,
        track_id: TrackId,
        replace_existing: bool,
    ) -> Result<Rsvp, AdmissionError> {
        self.require_event(event_id).await?;
        let rsvp = self
            .store
            .find_rsvp(user_id, event_id)
            .await?
            .ok_or(AdmissionError::NotFound {
                entity: "rsvp",
                id: user_id,
            })?;
        self.check_eligibility(user_id).await?;

        let kind = transitions::on_confirm(rsvp.status)?;

        if kind == ConfirmKind::TrackChange && rsvp.track_id == Some(track_id) {
            return Ok(rsvp);
        }

        let tracks = self.store.tracks_of_event(event_id).await?;
        let groups = self.store.track_groups_of_event(event_id).await?;
        let held: HashSet<TrackId> = rsvp
            .track_id
            .filter(|_| rsvp.status.holds_reservation())
            .into_iter()
            .collect();

        match track_groups::validate_selection(track_id, &tracks, &groups, &held) {
            Ok(()) => {}
            // An acknowledged conflict becomes a track change: the held
            // track is switched out below.
            Err(AdmissionError::Conflict { .. }) if replace_existing => {}
            Err(err) => return Err(err),
        }

        let track_unit = AdmissionUnit::Track(track_id);
        self.store.try_reserve(track_unit, 1).await?;

        if kind == ConfirmKind::Initial {
            if let Err(err) = self
                .store
                .try_reserve(AdmissionUnit::Event(event_id), 1)
                .await
            {
                self.compensate(track_unit).await;
                return Err(err);
            }
        }

        let draft = RsvpDraft {
            user_id,
            event_id,
            track_id: Some(track_id),
            status: RsvpStatus::Attending,
            guest_count: rsvp.guest_count,
        };
        let persisted = match self.persist(draft).await {
            Ok(updated) => updated,
            Err(err) => {
                self.compensate(track_unit).await;
                if kind == ConfirmKind::Initial {
                    self.compensate(AdmissionUnit::Event(event_id)).await;
                }
                return Err(err);
            }
        };

        if kind == ConfirmKind::TrackChange {
            if let Some(old_track) = rsvp.track_id {
                self.compensate(AdmissionUnit::Track(old_track)).await;
            }
        }

        tracing::info!(
            user_id = %user_id,
            event_id = %event_id,
            track_id = %track_id,
            "track confirmed"
        );
        self.notify_transition(Some(rsvp.status), &persisted);
        Ok(persisted)
    }

    /// Enter the waitlist, optionally for a specific track. Holds no
    /// reservation.
    pub async fn join_waitlist(
        &self,
        user_id: UserId,
        event_id: EventId,
        track_id: Option<TrackId>,
    ) -> Result<Rsvp, AdmissionError> {
        self.require_event(event_id).await?;
        self.check_eligibility(user_id).await?;

        let current = self.store.find_rsvp(user_id, event_id).await?;
        let previous_status = current.as_ref().map(|r| r.status);
        transitions::on_waitlist(previous_status)?;

        if let Some(id) = track_id {
            let track = self
                .store
                .find_track(id)
                .await?
                .filter(|t| t.event_id == event_id);
            if track.is_none() {
                return Err(AdmissionError::NotFound {
                    entity: "track",
                    id,
                });
            }
        }

        let draft = RsvpDraft {
            user_id,
            event_id,
            track_id,
            status: RsvpStatus::Waitlist,
            guest_count: current.as_ref().map(|r| r.guest_count).unwrap_or(1),
        };
        let persisted = self.persist(draft).await?;

        tracing::info!(user_id = %user_id, event_id = %event_id, "joined waitlist");
        self.notify_transition(previous_status, &persisted);
        Ok(persisted)
    }

    /// Cancel an RSVP: release any held reservation, then mark the row
    /// `not_attending`. The row is never deleted. Cancelling a missing or
    /// already cancelled RSVP is a no-op.
    pub async fn cancel(&self, user_id: UserId, event_id: EventId) -> Result<(), AdmissionError> {
        let Some(rsvp) = self.store.find_rsvp(user_id, event_id).await? else {
            return Ok(());
        };
        if rsvp.status == RsvpStatus::NotAttending {
            return Ok(());
        }

        let outcome = transitions::on_cancel(rsvp.status);
        if outcome.release_held {
            self.release_held_units(&rsvp).await?;
        }

        let draft = RsvpDraft {
            user_id,
            event_id,
            track_id: rsvp.track_id,
            status: RsvpStatus::NotAttending,
            guest_count: rsvp.guest_count,
        };
        let persisted = self.persist(draft).await?;

        tracing::info!(user_id = %user_id, event_id = %event_id, "RSVP cancelled");
        self.notify_transition(Some(rsvp.status), &persisted);
        Ok(())
    }

    /// Read-only occupancy snapshot for an event or track.
    pub async fn occupancy(&self, unit: AdmissionUnit) -> Result<Occupancy, AdmissionError> {
        self.store.occupancy_of(unit).await
    }

    /// The caller's RSVP for an event, if any.
    pub async fn rsvp_of(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<Option<Rsvp>, AdmissionError> {
        self.store.find_rsvp(user_id, event_id).await
    }

    /// Upsert an activity-level RSVP. Independent of the event-level RSVP
    /// and of capacity.
    pub async fn rsvp_activity(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        status: RsvpStatus,
    ) -> Result<ActivityRsvp, AdmissionError> {
        self.store
            .find_activity(activity_id)
            .await?
            .ok_or(AdmissionError::NotFound {
                entity: "activity",
                id: activity_id,
            })?;

        retry_with_backoff(&self.retry, || {
            self.store.upsert_activity_rsvp(user_id, activity_id, status)
        })
        .await
    }

    // -- internals -----------------------------------------------------------

    async fn require_event(
        &self,
        event_id: EventId,
    ) -> Result<gather_core::model::Event, AdmissionError> {
        self.store
            .find_event(event_id)
            .await?
            .ok_or(AdmissionError::NotFound {
                entity: "event",
                id: event_id,
            })
    }

    async fn check_eligibility(&self, user_id: UserId) -> Result<(), AdmissionError> {
        let completeness = self.profiles.completeness(user_id).await?;
        gather_core::eligibility::check_eligibility(&completeness)
    }

    async fn persist(&self, draft: RsvpDraft) -> Result<Rsvp, AdmissionError> {
        retry_with_backoff(&self.retry, || self.store.upsert_rsvp(draft.clone())).await
    }

    /// Release the units a confirmed RSVP holds: its track (when tracked)
    /// and its event.
    async fn release_held_units(&self, rsvp: &Rsvp) -> Result<(), AdmissionError> {
        if let Some(track_id) = rsvp.track_id {
            self.release_with_retry(AdmissionUnit::Track(track_id))
                .await?;
        }
        self.release_with_retry(AdmissionUnit::Event(rsvp.event_id))
            .await
    }

    async fn release_with_retry(&self, unit: AdmissionUnit) -> Result<(), AdmissionError> {
        retry_with_backoff(&self.retry, || self.store.release(unit, 1)).await
    }

    /// Compensating release after a later step failed. The original error
    /// is what surfaces; a release failure here is logged and swallowed.
    async fn compensate(&self, unit: AdmissionUnit) {
        if let Err(err) = self.release_with_retry(unit).await {
            tracing::error!(%unit, error = %err, "compensating release failed, slot leaked");
        }
    }

    fn notify_transition(&self, previous: Option<RsvpStatus>, rsvp: &Rsvp) {
        if previous == Some(rsvp.status) {
            return;
        }
        let kind = match rsvp.status {
            RsvpStatus::Attending => bus::RSVP_ATTENDING,
            RsvpStatus::Waitlist => bus::RSVP_WAITLISTED,
            RsvpStatus::NotAttending if previous.is_some() => bus::RSVP_CANCELLED,
            _ => return,
        };

        let mut notification = Notification::new(kind, rsvp.user_id, rsvp.event_id)
            .with_payload(serde_json::json!({ "guest_count": rsvp.guest_count }));
        if let Some(track_id) = rsvp.track_id {
            notification = notification.with_track(track_id);
        }
        self.bus.publish(notification);
    }
}
