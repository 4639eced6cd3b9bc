//! The admission error taxonomy.
//!
//! Every rejection an attendee can hit is a typed, recoverable value that
//! names exactly what to fix: which profile fields are missing, which
//! track conflicts, which unit is full. Only `Persistence` is transient;
//! the orchestrator retries it with backoff, nothing else.

use crate::capacity::AdmissionUnit;
use crate::status::RsvpStatus;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AdmissionError {
    /// The attendee's profile is missing required fields.
    #[error("profile incomplete, missing: {}", missing_fields.join(", "))]
    Ineligible { missing_fields: Vec<String> },

    /// The proposed track collides with an existing selection inside a
    /// mutually-exclusive group.
    #[error("track conflicts with {} in group '{group}'", conflicting_tracks.join(", "))]
    Conflict {
        group: String,
        conflicting_tracks: Vec<String>,
    },

    /// The admission unit has no free slots.
    #[error("{unit} is at capacity")]
    AtCapacity { unit: AdmissionUnit },

    /// The requested operation is not legal from the RSVP's current status.
    #[error("cannot {op} an RSVP that is '{from}'")]
    InvalidTransition { from: RsvpStatus, op: &'static str },

    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: uuid::Uuid,
    },

    /// A store call failed for a reason unrelated to the domain rules.
    /// Transient; retried with exponential backoff at the orchestrator
    /// boundary.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl AdmissionError {
    /// Whether retrying the same call can succeed without user action.
    pub fn is_transient(&self) -> bool {
        matches!(self, AdmissionError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ineligible_message_lists_fields() {
        let err = AdmissionError::Ineligible {
            missing_fields: vec!["phone".into(), "shirt_size".into()],
        };
        assert_eq!(err.to_string(), "profile incomplete, missing: phone, shirt_size");
    }

    #[test]
    fn conflict_message_names_group_and_tracks() {
        let err = AdmissionError::Conflict {
            group: "Morning Sessions".into(),
            conflicting_tracks: vec!["Rust 101".into()],
        };
        assert_eq!(
            err.to_string(),
            "track conflicts with Rust 101 in group 'Morning Sessions'"
        );
    }

    #[test]
    fn only_persistence_is_transient() {
        assert!(AdmissionError::Persistence("timeout".into()).is_transient());
        assert!(!AdmissionError::AtCapacity {
            unit: AdmissionUnit::Event(uuid::Uuid::new_v4())
        }
        .is_transient());
        assert!(!AdmissionError::Ineligible { missing_fields: vec![] }.is_transient());
    }
}
