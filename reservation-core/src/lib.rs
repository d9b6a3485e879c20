//! Reservation Core
//!
//! The booking lifecycle, nightly-rate resolution, and per-booking folio
//! ledger behind a property-management backend. Catalog CRUD, housekeeping,
//! messaging, and rendering live elsewhere; this crate owns the pieces
//! where ordering, conflict resolution, and numeric correctness matter.
//!
//! # Module structure
//!
//! ```text
//! reservation-core/src/
//! ├── pricing/       # nightly-rate resolution (matcher + resolver)
//! ├── lifecycle.rs   # booking status state machine and guards
//! ├── folio.rs       # append-only charge/payment ledger
//! ├── rooms.rs       # room assignments and occupancy overlap
//! ├── participants.rs# guest roster with a single primary
//! ├── bookings.rs    # booking aggregate root
//! ├── manager/       # operation contracts, per-booking atomicity
//! ├── catalog.rs     # collaborator seams (property/service catalogs)
//! └── money.rs       # decimal helpers, amount validation
//! ```

pub mod bookings;
pub mod catalog;
pub mod folio;
pub mod lifecycle;
pub mod manager;
pub mod money;
pub mod participants;
pub mod pricing;
pub mod rooms;

// Re-export public types
pub use bookings::BookingAggregate;
pub use catalog::{InMemoryCatalog, PropertyCatalog, RoomInfo, RoomTypeInfo, ServiceCatalog};
pub use folio::{Folio, LedgerError};
pub use lifecycle::{check_transition, GuardContext, LifecycleError};
pub use manager::{ManagerError, ManagerResult, ReservationManager};
pub use participants::ParticipantError;
pub use pricing::{resolve_rate, NightlyRate, QuoteRequest, RateError, RateQuote};
pub use rooms::{AssignmentError, Occupancy};

// Re-export the model types callers pass through the operation contracts
pub use shared::models::{
    Booking, BookingCreate, BookingGroup, BookingGroupCreate, BookingStatus, ChargeCategory,
    FolioTotals, Participant, ParticipantCreate, PricingRule, RoomAssignment,
};
