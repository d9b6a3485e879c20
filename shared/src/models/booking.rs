//! Booking Model

use crate::util::normalize_opt_string;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Booking lifecycle status
///
/// `CheckedOut`, `Completed`, `Cancelled` and `NoShow` are terminal: no
/// caller-requested transition leaves them. `Completed` is only ever set by
/// the folio-close cross-check, never by a direct transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Canonical wire name (SCREAMING_SNAKE_CASE)
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKED_IN",
            BookingStatus::CheckedOut => "CHECKED_OUT",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::NoShow => "NO_SHOW",
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::CheckedOut
                | BookingStatus::Completed
                | BookingStatus::Cancelled
                | BookingStatus::NoShow
        )
    }

    /// Pre-arrival states (the cancel / no-show window)
    pub fn is_pre_arrival(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// Unrecognized legacy status string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized booking status: {0:?}")]
pub struct ParseStatusError(pub String);

/// Map a legacy status string onto the canonical set.
///
/// Older exports carry free-form strings ("in_house", "CHECKED-IN",
/// "canceled", ...). Normalization happens once at the boundary, before any
/// lifecycle guard is evaluated. Pure mapping, not itself a guard.
pub fn normalize_legacy_status(raw: &str) -> Result<BookingStatus, ParseStatusError> {
    let canon: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    match canon.as_str() {
        "" | "new" | "pending" | "quote_accepted" => Ok(BookingStatus::Pending),
        "confirmed" | "booked" | "reserved" => Ok(BookingStatus::Confirmed),
        "checked_in" | "in_house" | "inhouse" | "arrived" => Ok(BookingStatus::CheckedIn),
        "checked_out" | "departed" => Ok(BookingStatus::CheckedOut),
        "completed" | "done" | "closed" => Ok(BookingStatus::Completed),
        "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
        "no_show" | "noshow" => Ok(BookingStatus::NoShow),
        _ => Err(ParseStatusError(raw.to_string())),
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_legacy_status(s)
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Deserialization accepts legacy aliases so stored data from older systems
// is normalized exactly once, at the parse boundary.
impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize_legacy_status(&raw).map_err(de::Error::custom)
    }
}

/// Booking entity
///
/// Created on quote acceptance. Never physically deleted: cancellation is a
/// status, not a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub property_id: i64,
    pub room_type_id: i64,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    /// Arrival date (stay window is [check_in, check_out))
    pub check_in: NaiveDate,
    /// Departure date, strictly after check_in
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub status: BookingStatus,
    /// Quoted total in currency unit
    pub total: f64,
    pub notes: Option<String>,
    /// Selected add-on service IDs
    pub service_ids: Vec<i64>,
    /// Group membership (at most one group per booking)
    pub group_id: Option<i64>,
    pub created_at: i64,
}

impl Booking {
    /// Number of nights in the stay window
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Create booking payload (quote acceptance)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub property_id: i64,
    pub room_type_id: i64,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub notes: Option<String>,
    pub service_ids: Vec<i64>,
}

impl BookingCreate {
    /// Collapse empty-string optional fields to absent, once, at the boundary
    pub fn normalized(mut self) -> Self {
        self.guest_email = normalize_opt_string(self.guest_email);
        self.guest_phone = normalize_opt_string(self.guest_phone);
        self.notes = normalize_opt_string(self.notes);
        self
    }
}

/// Booking group: multiple bookings under one responsible party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingGroup {
    pub id: i64,
    pub name: String,
    pub responsible_party: String,
    pub created_at: i64,
}

/// Create booking group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingGroupCreate {
    pub name: String,
    pub responsible_party: String,
}
