use crate::folio::LedgerError;
use crate::lifecycle::LifecycleError;
use crate::participants::ParticipantError;
use crate::pricing::RateError;
use crate::rooms::AssignmentError;
use shared::models::BookingStatus;
use thiserror::Error;

/// Manager errors
///
/// Every domain error is recoverable and carries enough structure for the
/// caller to drive a specific remediation flow; nothing here is fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ManagerError {
    #[error("booking not found: {0}")]
    BookingNotFound(i64),

    #[error("group not found: {0}")]
    GroupNotFound(i64),

    #[error("booking {booking_id} is {status:?} and no longer accepts changes")]
    BookingNotActive {
        booking_id: i64,
        status: BookingStatus,
    },

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Participant(#[from] ParticipantError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

pub type ManagerResult<T> = Result<T, ManagerError>;
