//! Room Assignments
//!
//! Links between a booking and physical rooms. The first assignment (or any
//! assignment made while no primary exists) becomes primary; later ones are
//! secondary until explicitly promoted. Cross-booking occupancy conflicts
//! are detected through the manager's per-room index using the half-open
//! stay window.

use chrono::NaiveDate;
use shared::models::RoomAssignment;
use shared::util::{now_millis, snowflake_id};
use thiserror::Error;

/// Assignment errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("room not found: {0}")]
    RoomNotFound(i64),

    #[error("assignment not found: {0}")]
    AssignmentNotFound(i64),

    #[error("room {room_id} is already assigned to booking {other_booking_id} over an overlapping stay")]
    RoomConflict { room_id: i64, other_booking_id: i64 },
}

/// A stay window claimed on one room by one booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub booking_id: i64,
    pub assignment_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Occupancy {
    /// Half-open [check_in, check_out) intersection: back-to-back stays
    /// share a turnover day and do not conflict.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }
}

/// Link a room to a booking. Becomes primary when no primary exists.
pub fn assign(
    assignments: &mut Vec<RoomAssignment>,
    booking_id: i64,
    room_id: i64,
) -> RoomAssignment {
    let is_primary = !assignments.iter().any(|a| a.is_primary);
    let assignment = RoomAssignment {
        id: snowflake_id(),
        booking_id,
        room_id,
        is_primary,
        assigned_at: now_millis(),
    };
    assignments.push(assignment.clone());
    assignment
}

/// Remove a link. Removing the primary leaves the booking primary-less;
/// the caller surfaces the warning and check-in stays blocked until a new
/// assignment exists.
pub fn unassign(
    assignments: &mut Vec<RoomAssignment>,
    assignment_id: i64,
) -> Result<RoomAssignment, AssignmentError> {
    let idx = assignments
        .iter()
        .position(|a| a.id == assignment_id)
        .ok_or(AssignmentError::AssignmentNotFound(assignment_id))?;
    Ok(assignments.remove(idx))
}

/// Promote an assignment to primary, demoting the current one
pub fn set_primary(
    assignments: &mut [RoomAssignment],
    assignment_id: i64,
) -> Result<(), AssignmentError> {
    if !assignments.iter().any(|a| a.id == assignment_id) {
        return Err(AssignmentError::AssignmentNotFound(assignment_id));
    }
    for assignment in assignments.iter_mut() {
        assignment.is_primary = assignment.id == assignment_id;
    }
    Ok(())
}

/// The booking's primary room link, if any
pub fn primary(assignments: &[RoomAssignment]) -> Option<&RoomAssignment> {
    assignments.iter().find(|a| a.is_primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_assignment_is_primary() {
        let mut assignments = Vec::new();
        let first = assign(&mut assignments, 1, 101);
        let second = assign(&mut assignments, 1, 102);

        assert!(first.is_primary);
        assert!(!second.is_primary);
        assert_eq!(primary(&assignments).unwrap().room_id, 101);
    }

    #[test]
    fn test_assignment_after_primary_removed_becomes_primary() {
        let mut assignments = Vec::new();
        let first = assign(&mut assignments, 1, 101);
        assign(&mut assignments, 1, 102);

        unassign(&mut assignments, first.id).unwrap();
        assert!(primary(&assignments).is_none());

        // A fresh assignment restores the primary
        let third = assign(&mut assignments, 1, 103);
        assert!(third.is_primary);
    }

    #[test]
    fn test_set_primary_demotes_previous() {
        let mut assignments = Vec::new();
        assign(&mut assignments, 1, 101);
        let second = assign(&mut assignments, 1, 102);

        set_primary(&mut assignments, second.id).unwrap();
        assert_eq!(primary(&assignments).unwrap().room_id, 102);
        assert_eq!(assignments.iter().filter(|a| a.is_primary).count(), 1);
    }

    #[test]
    fn test_unassign_unknown_fails() {
        let mut assignments = Vec::new();
        assert_eq!(
            unassign(&mut assignments, 42),
            Err(AssignmentError::AssignmentNotFound(42))
        );
        assert_eq!(
            set_primary(&mut assignments, 42),
            Err(AssignmentError::AssignmentNotFound(42))
        );
    }

    #[test]
    fn test_occupancy_overlap_half_open() {
        let occupancy = Occupancy {
            booking_id: 1,
            assignment_id: 10,
            check_in: date(2025, 3, 1),
            check_out: date(2025, 3, 4),
        };

        // Intersecting windows conflict
        assert!(occupancy.overlaps(date(2025, 3, 3), date(2025, 3, 6)));
        assert!(occupancy.overlaps(date(2025, 2, 27), date(2025, 3, 2)));
        assert!(occupancy.overlaps(date(2025, 3, 2), date(2025, 3, 3)));

        // Back-to-back stays share the turnover day: no conflict
        assert!(!occupancy.overlaps(date(2025, 3, 4), date(2025, 3, 7)));
        assert!(!occupancy.overlaps(date(2025, 2, 25), date(2025, 3, 1)));
    }
}
