//! Nightly Rate Resolution
//!
//! This module computes the nightly price schedule for a stay request from
//! the active pricing rules:
//!
//! - **matcher**: which rules apply to a given night, and how overlapping
//!   rules rank against each other
//! - **resolver**: per-night winner selection, effect application, stay
//!   bound enforcement, and quote totals

pub mod matcher;
mod resolver;

pub use matcher::*;
pub use resolver::*;
