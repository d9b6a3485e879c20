//! Data models for the reservation core

pub mod booking;
pub mod folio;
pub mod participant;
pub mod pricing_rule;
pub mod room;

pub use booking::*;
pub use folio::*;
pub use participant::*;
pub use pricing_rule::*;
pub use room::*;
