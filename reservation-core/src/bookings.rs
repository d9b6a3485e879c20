//! Booking Aggregate
//!
//! One booking with everything its invariants span: room links, participant
//! roster, folio ledger, and the optimistic-concurrency version. Every
//! manager operation locks exactly one aggregate, so the invariants hold
//! after each mutation.

use serde::{Deserialize, Serialize};
use shared::models::{Booking, Participant, RoomAssignment};

use crate::folio::Folio;
use crate::lifecycle::GuardContext;
use crate::{participants, rooms};

/// Booking aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAggregate {
    pub booking: Booking,
    pub assignments: Vec<RoomAssignment>,
    pub participants: Vec<Participant>,
    pub folio: Folio,
    /// Bumped on every successful mutation. The token an external
    /// persistence layer would use for optimistic concurrency.
    pub version: u64,
}

impl BookingAggregate {
    pub fn new(booking: Booking) -> Self {
        Self {
            booking,
            assignments: Vec::new(),
            participants: Vec::new(),
            folio: Folio::new(),
            version: 0,
        }
    }

    pub fn primary_room(&self) -> Option<&RoomAssignment> {
        rooms::primary(&self.assignments)
    }

    pub fn primary_participant(&self) -> Option<&Participant> {
        participants::primary(&self.participants)
    }

    /// Preconditions the check-in guard consults
    pub fn guard_context(&self) -> GuardContext {
        GuardContext {
            has_primary_room: self.primary_room().is_some(),
            has_primary_guest: self.primary_participant().is_some(),
        }
    }

    /// Record a successful mutation
    pub fn touch(&mut self) {
        self.version += 1;
    }
}
