//! ReservationManager - operation contracts over booking aggregates
//!
//! The facade the caller (UI action → server mutation) talks to. Each
//! operation runs as an atomic unit against one booking aggregate:
//!
//! ```text
//! operation(booking_id, ...)
//!     ├─ 1. Resolve the aggregate handle
//!     ├─ 2. Lock the aggregate (per-booking serialization)
//!     ├─ 3. Validate (status gate, domain guard)
//!     ├─ 4. Mutate booking / assignments / roster / folio
//!     ├─ 5. Maintain the room-occupancy index
//!     ├─ 6. Bump the aggregate version
//!     └─ 7. Return result or a structured, recoverable error
//! ```
//!
//! The occupancy index is the only cross-booking structure; lock order is
//! always aggregate → index.

mod error;
pub use error::*;

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use shared::models::{
    Booking, BookingCreate, BookingGroup, BookingGroupCreate, BookingStatus, ChargeCategory,
    FolioTotals, Participant, ParticipantCreate, PricingRule, RoomAssignment,
};
use shared::util::{now_millis, snowflake_id};
use tracing::{debug, info, warn};

use crate::bookings::BookingAggregate;
use crate::catalog::{PropertyCatalog, ServiceCatalog};
use crate::lifecycle::check_transition;
use crate::pricing::{resolve_rate, QuoteRequest, RateError, RateQuote};
use crate::participants;
use crate::rooms::{self, AssignmentError, Occupancy};

/// Reservation manager holding the live booking aggregates
///
/// Persistence is an external collaborator: aggregates enter through
/// `create_booking` or `restore_booking` and leave by being read off.
pub struct ReservationManager {
    properties: Arc<dyn PropertyCatalog>,
    services: Arc<dyn ServiceCatalog>,
    /// Active pricing rules, replaced wholesale by the admin workflow
    rules: RwLock<Vec<PricingRule>>,
    bookings: DashMap<i64, Arc<Mutex<BookingAggregate>>>,
    groups: RwLock<HashMap<i64, BookingGroup>>,
    /// Per-room stay windows of non-terminal bookings, for conflict checks
    occupancy: RwLock<HashMap<i64, Vec<Occupancy>>>,
}

impl std::fmt::Debug for ReservationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationManager")
            .field("bookings", &self.bookings.len())
            .field("rules", &self.rules.read().len())
            .finish()
    }
}

impl ReservationManager {
    pub fn new(properties: Arc<dyn PropertyCatalog>, services: Arc<dyn ServiceCatalog>) -> Self {
        info!("reservation manager started");
        Self {
            properties,
            services,
            rules: RwLock::new(Vec::new()),
            bookings: DashMap::new(),
            groups: RwLock::new(HashMap::new()),
            occupancy: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the active pricing rule set (fed by the admin workflow)
    pub fn set_pricing_rules(&self, rules: Vec<PricingRule>) {
        info!(count = rules.len(), "pricing rule set replaced");
        *self.rules.write() = rules;
    }

    fn aggregate(&self, booking_id: i64) -> ManagerResult<Arc<Mutex<BookingAggregate>>> {
        self.bookings
            .get(&booking_id)
            .map(|entry| entry.value().clone())
            .ok_or(ManagerError::BookingNotFound(booking_id))
    }

    fn ensure_active(aggregate: &BookingAggregate) -> ManagerResult<()> {
        if aggregate.booking.status.is_terminal() {
            return Err(ManagerError::BookingNotActive {
                booking_id: aggregate.booking.id,
                status: aggregate.booking.status,
            });
        }
        Ok(())
    }

    // ==================== Quotes and bookings ====================

    /// Resolve a rate quote against the current rule set. Pure read.
    pub fn quote(&self, request: &QuoteRequest) -> Result<RateQuote, RateError> {
        let rules = self.rules.read();
        resolve_rate(request, &rules, self.properties.as_ref(), self.services.as_ref())
    }

    /// Accept a quote: price the stay against the active rule set and store
    /// the booking as `Pending` with the quoted total.
    pub fn create_booking(&self, create: BookingCreate) -> ManagerResult<Booking> {
        let create = create.normalized();
        let request = QuoteRequest {
            property_id: create.property_id,
            room_type_id: create.room_type_id,
            check_in: create.check_in,
            check_out: create.check_out,
            guest_count: create.guest_count,
            service_ids: create.service_ids.clone(),
        };
        let quote = self.quote(&request)?;

        let booking = Booking {
            id: snowflake_id(),
            property_id: create.property_id,
            room_type_id: create.room_type_id,
            guest_name: create.guest_name,
            guest_email: create.guest_email,
            guest_phone: create.guest_phone,
            check_in: create.check_in,
            check_out: create.check_out,
            guest_count: create.guest_count,
            status: BookingStatus::Pending,
            total: quote.total,
            notes: create.notes,
            service_ids: create.service_ids,
            group_id: None,
            created_at: now_millis(),
        };
        info!(
            booking_id = booking.id,
            total = booking.total,
            nights = booking.nights(),
            "booking created from accepted quote"
        );
        self.bookings.insert(
            booking.id,
            Arc::new(Mutex::new(BookingAggregate::new(booking.clone()))),
        );
        Ok(booking)
    }

    /// Re-register a persisted aggregate (external store hand-off). Legacy
    /// status strings are expected to have been normalized by deserialization
    /// before the aggregate reaches this point. Occupancies of non-terminal
    /// bookings are re-indexed; conflicts in restored data are logged, not
    /// rejected, because the bookings already exist.
    pub fn restore_booking(&self, aggregate: BookingAggregate) -> i64 {
        let booking_id = aggregate.booking.id;
        if !aggregate.booking.status.is_terminal() {
            let mut index = self.occupancy.write();
            for assignment in &aggregate.assignments {
                let entries = index.entry(assignment.room_id).or_default();
                if let Some(other) = entries.iter().find(|o| {
                    o.booking_id != booking_id
                        && o.overlaps(aggregate.booking.check_in, aggregate.booking.check_out)
                }) {
                    warn!(
                        booking_id,
                        room_id = assignment.room_id,
                        other_booking_id = other.booking_id,
                        "restored booking overlaps an existing occupancy"
                    );
                }
                entries.push(Occupancy {
                    booking_id,
                    assignment_id: assignment.id,
                    check_in: aggregate.booking.check_in,
                    check_out: aggregate.booking.check_out,
                });
            }
        }
        self.bookings
            .insert(booking_id, Arc::new(Mutex::new(aggregate)));
        debug!(booking_id, "booking aggregate restored");
        booking_id
    }

    /// Snapshot of the booking record
    pub fn booking(&self, booking_id: i64) -> ManagerResult<Booking> {
        let arc = self.aggregate(booking_id)?;
        let aggregate = arc.lock();
        Ok(aggregate.booking.clone())
    }

    /// Aggregate version (optimistic-concurrency token)
    pub fn version(&self, booking_id: i64) -> ManagerResult<u64> {
        let arc = self.aggregate(booking_id)?;
        let aggregate = arc.lock();
        Ok(aggregate.version)
    }

    // ==================== Room assignments ====================

    /// Link a room to a booking. The first assignment (or any assignment
    /// made while no primary exists) becomes primary. Rejected when the room
    /// is already claimed by another active booking over an intersecting
    /// stay window.
    pub fn assign_room(&self, booking_id: i64, room_id: i64) -> ManagerResult<RoomAssignment> {
        if self.properties.room(room_id).is_none() {
            return Err(AssignmentError::RoomNotFound(room_id).into());
        }

        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;

        let (check_in, check_out) = (aggregate.booking.check_in, aggregate.booking.check_out);

        // Check and claim under one write lock so two bookings cannot both
        // pass the overlap test for the same room.
        let mut index = self.occupancy.write();
        let entries = index.entry(room_id).or_default();
        if let Some(other) = entries
            .iter()
            .find(|o| o.booking_id != booking_id && o.overlaps(check_in, check_out))
        {
            return Err(AssignmentError::RoomConflict {
                room_id,
                other_booking_id: other.booking_id,
            }
            .into());
        }

        let assignment = rooms::assign(&mut aggregate.assignments, booking_id, room_id);
        entries.push(Occupancy {
            booking_id,
            assignment_id: assignment.id,
            check_in,
            check_out,
        });
        drop(index);

        aggregate.touch();
        debug!(
            booking_id,
            room_id,
            assignment_id = assignment.id,
            is_primary = assignment.is_primary,
            "room assigned"
        );
        Ok(assignment)
    }

    /// Remove a room link. Removing the primary is allowed but leaves the
    /// booking unable to check in until a new assignment exists.
    pub fn unassign_room(&self, booking_id: i64, assignment_id: i64) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;

        let removed = rooms::unassign(&mut aggregate.assignments, assignment_id)?;

        let mut index = self.occupancy.write();
        if let Some(entries) = index.get_mut(&removed.room_id) {
            entries.retain(|o| o.assignment_id != assignment_id);
        }
        drop(index);

        if removed.is_primary {
            warn!(
                booking_id,
                assignment_id, "primary room unassigned; booking cannot check in until reassigned"
            );
        }
        aggregate.touch();
        Ok(())
    }

    /// Promote an assignment to primary
    pub fn set_primary_room(&self, booking_id: i64, assignment_id: i64) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;
        rooms::set_primary(&mut aggregate.assignments, assignment_id)?;
        aggregate.touch();
        Ok(())
    }

    /// Room id of the primary assignment, if any
    pub fn primary_room(&self, booking_id: i64) -> ManagerResult<Option<i64>> {
        let arc = self.aggregate(booking_id)?;
        let aggregate = arc.lock();
        Ok(aggregate.primary_room().map(|a| a.room_id))
    }

    // ==================== Participants ====================

    pub fn add_participant(
        &self,
        booking_id: i64,
        create: ParticipantCreate,
    ) -> ManagerResult<Participant> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;
        let participant = participants::add(&mut aggregate.participants, booking_id, create);
        aggregate.touch();
        Ok(participant)
    }

    pub fn remove_participant(&self, booking_id: i64, participant_id: i64) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;
        participants::remove(&mut aggregate.participants, participant_id)?;
        aggregate.touch();
        Ok(())
    }

    pub fn set_primary_participant(
        &self,
        booking_id: i64,
        participant_id: i64,
    ) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;
        participants::set_primary(&mut aggregate.participants, participant_id)?;
        aggregate.touch();
        Ok(())
    }

    // ==================== Folio ====================

    pub fn add_charge(
        &self,
        booking_id: i64,
        description: impl Into<String>,
        amount: f64,
        category: ChargeCategory,
    ) -> ManagerResult<String> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        let id = aggregate.folio.add_charge(description, amount, category)?;
        aggregate.touch();
        Ok(id)
    }

    pub fn add_payment(
        &self,
        booking_id: i64,
        amount: f64,
        method: impl Into<String>,
    ) -> ManagerResult<String> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        let id = aggregate.folio.add_payment(amount, method)?;
        aggregate.touch();
        Ok(id)
    }

    /// Folio totals, folded from the full history
    pub fn totals(&self, booking_id: i64) -> ManagerResult<FolioTotals> {
        let arc = self.aggregate(booking_id)?;
        let aggregate = arc.lock();
        Ok(aggregate.folio.totals())
    }

    /// Close the folio (balance must be settled). A checked-out booking
    /// whose folio closes is promoted to `Completed` - the completion signal
    /// the lifecycle cross-checks.
    pub fn close_folio(&self, booking_id: i64) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        aggregate.folio.close()?;
        info!(booking_id, "folio closed");

        if aggregate.booking.status == BookingStatus::CheckedOut {
            aggregate.booking.status = BookingStatus::Completed;
            info!(booking_id, "booking completed (checked out, folio settled)");
        }
        aggregate.touch();
        Ok(())
    }

    // ==================== Lifecycle ====================

    /// Request a status transition. Guard violations come back as
    /// structured `LifecycleError`s naming the unmet precondition.
    pub fn transition(&self, booking_id: i64, requested: BookingStatus) -> ManagerResult<()> {
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();

        let current = aggregate.booking.status;
        check_transition(current, requested, aggregate.guard_context())?;

        // Check-out with an already-settled folio completes immediately
        // (the other direction of the folio-close cross-check).
        let next = if requested == BookingStatus::CheckedOut && aggregate.folio.is_closed() {
            BookingStatus::Completed
        } else {
            requested
        };

        aggregate.booking.status = next;
        if next.is_terminal() {
            self.release_occupancies(booking_id, &aggregate);
        }
        aggregate.touch();
        info!(
            booking_id,
            from = current.as_str(),
            to = next.as_str(),
            "booking status changed"
        );
        Ok(())
    }

    /// Drop every occupancy claim of a booking (it reached a terminal state)
    fn release_occupancies(&self, booking_id: i64, aggregate: &BookingAggregate) {
        let mut index = self.occupancy.write();
        for assignment in &aggregate.assignments {
            if let Some(entries) = index.get_mut(&assignment.room_id) {
                entries.retain(|o| o.booking_id != booking_id);
            }
        }
    }

    // ==================== Groups ====================

    pub fn create_group(&self, create: BookingGroupCreate) -> BookingGroup {
        let group = BookingGroup {
            id: snowflake_id(),
            name: create.name,
            responsible_party: create.responsible_party,
            created_at: now_millis(),
        };
        self.groups.write().insert(group.id, group.clone());
        group
    }

    /// Put a booking under a group's responsible party. A booking belongs to
    /// at most one group; re-assigning replaces the previous membership.
    pub fn assign_group(&self, booking_id: i64, group_id: i64) -> ManagerResult<()> {
        if !self.groups.read().contains_key(&group_id) {
            return Err(ManagerError::GroupNotFound(group_id));
        }
        let arc = self.aggregate(booking_id)?;
        let mut aggregate = arc.lock();
        Self::ensure_active(&aggregate)?;
        aggregate.booking.group_id = Some(group_id);
        aggregate.touch();
        Ok(())
    }
}
