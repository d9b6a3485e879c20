//! Booking Participants
//!
//! The guest roster attached to a booking. Exactly one participant is
//! primary whenever the roster is non-empty: the first added participant
//! becomes primary, promotion demotes the previous primary, and a primary
//! participant can never be removed directly.

use shared::models::{Participant, ParticipantCreate};
use shared::util::snowflake_id;
use thiserror::Error;

/// Participant roster errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParticipantError {
    #[error("participant not found: {0}")]
    NotFound(i64),

    #[error("cannot remove the primary participant; promote another participant first")]
    PrimaryRemoval,
}

/// Attach a guest to the booking. The first participant becomes primary.
pub fn add(
    participants: &mut Vec<Participant>,
    booking_id: i64,
    create: ParticipantCreate,
) -> Participant {
    let is_primary = participants.is_empty();
    let participant = Participant {
        id: snowflake_id(),
        booking_id,
        guest_id: create.guest_id,
        name: create.name,
        is_primary,
    };
    participants.push(participant.clone());
    participant
}

/// Remove a participant. The primary is never removable: promote a
/// replacement first, and the last remaining participant stays put.
pub fn remove(
    participants: &mut Vec<Participant>,
    participant_id: i64,
) -> Result<Participant, ParticipantError> {
    let idx = participants
        .iter()
        .position(|p| p.id == participant_id)
        .ok_or(ParticipantError::NotFound(participant_id))?;
    if participants[idx].is_primary {
        return Err(ParticipantError::PrimaryRemoval);
    }
    Ok(participants.remove(idx))
}

/// Promote a participant to primary, demoting the current one
pub fn set_primary(
    participants: &mut [Participant],
    participant_id: i64,
) -> Result<(), ParticipantError> {
    if !participants.iter().any(|p| p.id == participant_id) {
        return Err(ParticipantError::NotFound(participant_id));
    }
    for participant in participants.iter_mut() {
        participant.is_primary = participant.id == participant_id;
    }
    Ok(())
}

/// The booking's primary participant, if any
pub fn primary(participants: &[Participant]) -> Option<&Participant> {
    participants.iter().find(|p| p.is_primary)
}
