//! Booking Lifecycle
//!
//! The state machine gating booking status transitions:
//!
//! ```text
//! pending → confirmed → checked_in → checked_out → completed
//!     \         \
//!      → cancelled / no_show   (pre-arrival only)
//! ```
//!
//! `checked_out`, `cancelled`, `no_show` and `completed` are terminal. The
//! `checked_out → completed` edge is never taken by a caller-requested
//! transition; the manager promotes it through the folio-close cross-check.
//!
//! Guard evaluation is pure: the caller supplies the precondition context
//! and the current status; locking and mutation belong to the manager.

use serde::{Deserialize, Serialize};
use shared::models::BookingStatus;
use thiserror::Error;

/// Guard violation. Each variant is a machine-readable reason the caller
/// can map to specific remediation UI, not a generic failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleError {
    #[error("check-in unavailable: booking has no primary room assignment")]
    MissingRoom,

    #[error("check-in unavailable: booking has no primary guest")]
    MissingPrimaryGuest,

    #[error("cannot move booking from {current:?} to {requested:?}")]
    WrongState {
        current: BookingStatus,
        requested: BookingStatus,
    },
}

/// Preconditions the check-in guard consults
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardContext {
    pub has_primary_room: bool,
    pub has_primary_guest: bool,
}

/// Validate a requested transition from `current` to `requested`.
///
/// Re-invoking a transition from the state it already produced is a
/// `WrongState` error, not a crash: terminal states and self-transitions
/// both land here.
///
/// For check-in the room precondition is checked before the guest one, so
/// the caller always learns the first unmet precondition to fix.
pub fn check_transition(
    current: BookingStatus,
    requested: BookingStatus,
    ctx: GuardContext,
) -> Result<(), LifecycleError> {
    use BookingStatus::*;

    if current.is_terminal() {
        return Err(LifecycleError::WrongState { current, requested });
    }

    match requested {
        Confirmed if current == Pending => Ok(()),
        CheckedIn if current.is_pre_arrival() => {
            if !ctx.has_primary_room {
                return Err(LifecycleError::MissingRoom);
            }
            if !ctx.has_primary_guest {
                return Err(LifecycleError::MissingPrimaryGuest);
            }
            Ok(())
        }
        CheckedOut if current == CheckedIn => Ok(()),
        Cancelled if current.is_pre_arrival() => Ok(()),
        NoShow if current.is_pre_arrival() => Ok(()),
        // Completed is reached through the folio-close cross-check only
        _ => Err(LifecycleError::WrongState { current, requested }),
    }
}
