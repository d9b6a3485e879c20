//! Room Assignment Model

use serde::{Deserialize, Serialize};

/// Link between a booking and a physical room
///
/// At most one assignment per booking is primary; the primary assignment is
/// what gates check-in. Unassignment removes the link, never the booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomAssignment {
    pub id: i64,
    pub booking_id: i64,
    pub room_id: i64,
    pub is_primary: bool,
    pub assigned_at: i64,
}
