//! Shared types for the reservation core
//!
//! Plain data model types used across crates: bookings and their lifecycle
//! status, pricing rules, room assignments, participants, and folio entries,
//! plus small utilities (snowflake IDs, timestamps, boundary normalization).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
