//! Track-group resolver: "choose at most one track per mutually-exclusive
//! group".
//!
//! The resolver is a pure computation over the event's track topology and
//! the user's existing selections. A conflict names the group and the
//! specific conflicting tracks so the caller can present a precise
//! confirmation prompt.

use std::collections::HashSet;

use crate::error::AdmissionError;
use crate::model::{Track, TrackGroup};
use crate::types::TrackId;

/// Validate a proposed track selection against the user's existing
/// selections at the same event.
///
/// Rules:
/// - an ungrouped track never conflicts;
/// - a track in a non-exclusive group never conflicts;
/// - a track in a mutually-exclusive group conflicts with every *other*
///   track of that group the user already holds.
///
/// `existing` is the set of track ids the user currently holds at this
/// event. The proposed track itself is ignored if present (re-selecting
/// the same track is not a conflict).
pub fn validate_selection(
    proposed: TrackId,
    tracks: &[Track],
    groups: &[TrackGroup],
    existing: &HashSet<TrackId>,
) -> Result<(), AdmissionError> {
    let proposed_track = tracks
        .iter()
        .find(|t| t.id == proposed)
        .ok_or(AdmissionError::NotFound {
            entity: "track",
            id: proposed,
        })?;

    let Some(group_id) = proposed_track.group_id else {
        return Ok(());
    };

    let group = groups
        .iter()
        .find(|g| g.id == group_id)
        .ok_or(AdmissionError::NotFound {
            entity: "track group",
            id: group_id,
        })?;

    if !group.is_mutually_exclusive {
        return Ok(());
    }

    let mut conflicting: Vec<&Track> = tracks
        .iter()
        .filter(|t| {
            t.id != proposed && t.group_id == Some(group_id) && existing.contains(&t.id)
        })
        .collect();

    if conflicting.is_empty() {
        return Ok(());
    }

    conflicting.sort_by_key(|t| t.position);
    Err(AdmissionError::Conflict {
        group: group.name.clone(),
        conflicting_tracks: conflicting.iter().map(|t| t.name.clone()).collect(),
    })
}
