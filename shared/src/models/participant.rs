//! Participant Model

use serde::{Deserialize, Serialize};

/// Guest attached to a booking
///
/// Exactly one participant is primary whenever the roster is non-empty. The
/// guest directory itself is an external collaborator; only the reference
/// and a display-name snapshot live here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub booking_id: i64,
    /// Guest directory reference
    pub guest_id: i64,
    /// Name snapshot for display
    pub name: String,
    pub is_primary: bool,
}

/// Add participant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantCreate {
    pub guest_id: i64,
    pub name: String,
}
