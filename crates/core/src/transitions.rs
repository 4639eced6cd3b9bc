//! The RSVP state machine.
//!
//! Pure transition functions consumed by the admission orchestrator. Each
//! operation takes the RSVP's current status (or `None` when no row
//! exists) and returns either the target status plus the ledger side
//! effects the orchestrator must perform, or a typed rejection. Illegal
//! transitions (e.g. waitlist back to pending) are not expressible: no
//! function produces them.
//!
//! Status graph:
//!
//! ```text
//! NONE ──request(tracked)──► PENDING ──confirm──► ATTENDING
//!   │                           │  └──full track──► (AtCapacity, stays PENDING)
//!   │                           └──join waitlist─► WAITLIST ──confirm──► ATTENDING
//!   ├──request(untracked)──► ATTENDING ──change track──► ATTENDING
//!   └──maybe──► MAYBE ──request──► PENDING | ATTENDING
//! any non-terminal ──cancel──► NOT_ATTENDING ──re-request──► ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::status::RsvpStatus;

/// What the attendee asked for when requesting admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionIntent {
    /// Attend the event (via a track on tracked events).
    Attend,
    /// Tentative interest; never holds capacity.
    Maybe,
    /// Decline without ever attending.
    Decline,
}

/// Target state and ledger side effects for an admission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status: RsvpStatus,
    /// Reserve one unit on the event before persisting the RSVP.
    pub reserve_event: bool,
    /// Release the reservation currently held (track and event).
    pub release_held: bool,
}

/// How a track confirmation affects the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// First confirmation: reserve on both the track and the event.
    Initial,
    /// Already attending: reserve the new track, then release the old one.
    TrackChange,
}

/// Ledger side effect of a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOutcome {
    /// Release the held reservation before persisting the new status.
    pub release_held: bool,
}

/// Resolve an admission request against the current status.
///
/// Re-requesting the current state is idempotent: the outcome repeats the
/// status with no ledger effect, and the orchestrator upserts rather than
/// inserting a second row.
pub fn on_request(
    current: Option<RsvpStatus>,
    has_tracks: bool,
    intent: AdmissionIntent,
) -> Result<RequestOutcome, AdmissionError> {
    use RsvpStatus::*;

    match intent {
        AdmissionIntent::Attend => match current {
            // Already confirmed; keep the reservation and track.
            Some(Attending) => Ok(RequestOutcome {
                status: Attending,
                reserve_event: false,
                release_held: false,
            }),
            // Tracked events defer capacity to track confirmation.
            Some(Pending) if has_tracks => Ok(RequestOutcome {
                status: Pending,
                reserve_event: false,
                release_held: false,
            }),
            // Re-requesting while waitlisted does not jump the queue.
            Some(Waitlist) if has_tracks => Ok(RequestOutcome {
                status: Waitlist,
                reserve_event: false,
                release_held: false,
            }),
            _ if has_tracks => Ok(RequestOutcome {
                status: Pending,
                reserve_event: false,
                release_held: false,
            }),
            // Untracked events admit directly against the event unit.
            _ => Ok(RequestOutcome {
                status: Attending,
                reserve_event: true,
                release_held: false,
            }),
        },

        AdmissionIntent::Maybe => match current {
            None | Some(Maybe) | Some(NotAttending) => Ok(RequestOutcome {
                status: Maybe,
                reserve_event: false,
                release_held: false,
            }),
            Some(from) => Err(AdmissionError::InvalidTransition {
                from,
                op: "mark maybe",
            }),
        },

        AdmissionIntent::Decline => Ok(RequestOutcome {
            status: NotAttending,
            reserve_event: false,
            release_held: current.is_some_and(RsvpStatus::holds_reservation),
        }),
    }
}

/// Check that a track confirmation is legal from the current status.
pub fn on_confirm(current: RsvpStatus) -> Result<ConfirmKind, AdmissionError> {
    match current {
        RsvpStatus::Pending | RsvpStatus::Waitlist => Ok(ConfirmKind::Initial),
        RsvpStatus::Attending => Ok(ConfirmKind::TrackChange),
        from @ (RsvpStatus::Maybe | RsvpStatus::NotAttending) => {
            Err(AdmissionError::InvalidTransition {
                from,
                op: "confirm a track for",
            })
        }
    }
}

/// Check that joining the waitlist is legal from the current status.
///
/// The waitlist never holds capacity, so it is open from every state
/// except a confirmed attendance.
pub fn on_waitlist(current: Option<RsvpStatus>) -> Result<(), AdmissionError> {
    match current {
        Some(RsvpStatus::Attending) => Err(AdmissionError::InvalidTransition {
            from: RsvpStatus::Attending,
            op: "waitlist",
        }),
        _ => Ok(()),
    }
}

/// Resolve a cancellation. Legal from every status; cancelling an already
/// cancelled RSVP is a no-op.
pub fn on_cancel(current: RsvpStatus) -> CancelOutcome {
    CancelOutcome {
        release_held: current.holds_reservation(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use RsvpStatus::*;

    // -- on_request: attend ---------------------------------------------------

    #[test]
    fn first_request_on_tracked_event_goes_pending_without_reserving() {
        let outcome = on_request(None, true, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Pending);
        assert!(!outcome.reserve_event);
        assert!(!outcome.release_held);
    }

    #[test]
    fn first_request_on_untracked_event_attends_and_reserves() {
        let outcome = on_request(None, false, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Attending);
        assert!(outcome.reserve_event);
    }

    #[test]
    fn repeat_request_is_idempotent() {
        for (current, has_tracks) in [(Pending, true), (Attending, false), (Waitlist, true)] {
            let outcome = on_request(Some(current), has_tracks, AdmissionIntent::Attend).unwrap();
            assert_eq!(outcome.status, current, "from {current}");
            assert!(!outcome.reserve_event, "no double reservation from {current}");
        }
    }

    #[test]
    fn attending_on_tracked_event_stays_attending() {
        // Re-requesting admission must not demote a confirmed attendee
        // back to pending.
        let outcome = on_request(Some(Attending), true, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Attending);
    }

    #[test]
    fn waitlist_never_returns_to_pending() {
        let outcome = on_request(Some(Waitlist), true, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Waitlist);
    }

    #[test]
    fn maybe_upgrades_to_pending_on_tracked_event() {
        let outcome = on_request(Some(Maybe), true, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Pending);
    }

    #[test]
    fn cancelled_rsvp_can_re_request() {
        let outcome = on_request(Some(NotAttending), false, AdmissionIntent::Attend).unwrap();
        assert_eq!(outcome.status, Attending);
        assert!(outcome.reserve_event);
    }

    // -- on_request: maybe ----------------------------------------------------

    #[test]
    fn maybe_is_reachable_from_none_and_itself() {
        for current in [None, Some(Maybe), Some(NotAttending)] {
            let outcome = on_request(current, true, AdmissionIntent::Maybe).unwrap();
            assert_eq!(outcome.status, Maybe);
            assert!(!outcome.reserve_event);
        }
    }

    #[test]
    fn maybe_is_not_a_downgrade_path() {
        for current in [Pending, Attending, Waitlist] {
            assert_matches!(
                on_request(Some(current), true, AdmissionIntent::Maybe),
                Err(AdmissionError::InvalidTransition { from, .. }) if from == current
            );
        }
    }

    // -- on_request: decline --------------------------------------------------

    #[test]
    fn decline_releases_only_held_reservations() {
        let outcome = on_request(Some(Attending), false, AdmissionIntent::Decline).unwrap();
        assert_eq!(outcome.status, NotAttending);
        assert!(outcome.release_held);

        let outcome = on_request(Some(Pending), true, AdmissionIntent::Decline).unwrap();
        assert_eq!(outcome.status, NotAttending);
        assert!(!outcome.release_held);

        let outcome = on_request(None, true, AdmissionIntent::Decline).unwrap();
        assert_eq!(outcome.status, NotAttending);
        assert!(!outcome.release_held);
    }

    // -- on_confirm -----------------------------------------------------------

    #[test]
    fn confirm_is_initial_from_pending_and_waitlist() {
        assert_eq!(on_confirm(Pending).unwrap(), ConfirmKind::Initial);
        assert_eq!(on_confirm(Waitlist).unwrap(), ConfirmKind::Initial);
    }

    #[test]
    fn confirm_from_attending_is_a_track_change() {
        assert_eq!(on_confirm(Attending).unwrap(), ConfirmKind::TrackChange);
    }

    #[test]
    fn confirm_rejected_from_maybe_and_cancelled() {
        assert_matches!(
            on_confirm(Maybe),
            Err(AdmissionError::InvalidTransition { from: Maybe, .. })
        );
        assert_matches!(
            on_confirm(NotAttending),
            Err(AdmissionError::InvalidTransition { from: NotAttending, .. })
        );
    }

    // -- on_waitlist ----------------------------------------------------------

    #[test]
    fn waitlist_open_from_everything_but_attending() {
        for current in [None, Some(Pending), Some(Waitlist), Some(Maybe), Some(NotAttending)] {
            assert!(on_waitlist(current).is_ok(), "from {current:?}");
        }
        assert_matches!(
            on_waitlist(Some(Attending)),
            Err(AdmissionError::InvalidTransition { from: Attending, .. })
        );
    }

    // -- on_cancel ------------------------------------------------------------

    #[test]
    fn cancel_releases_only_attending() {
        assert!(on_cancel(Attending).release_held);
        assert!(!on_cancel(Pending).release_held);
        assert!(!on_cancel(Waitlist).release_held);
        assert!(!on_cancel(Maybe).release_held);
        assert!(!on_cancel(NotAttending).release_held);
    }
}
