//! Pricing Rule Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pricing rule entity
///
/// Scoped to one property, optionally narrowed to a single room type
/// (`room_type_id = None` applies to all room types). The validity window is
/// inclusive on both ends. The effect is either an absolute nightly override
/// or a multiplicative modifier on the room type's base price; the override
/// wins when both are set.
///
/// Rules become immutable once a completed booking has been quoted against
/// them; editing is an external admin workflow and the core only ever sees
/// the current rule set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: i64,
    pub property_id: i64,
    /// None = applies to every room type of the property
    pub room_type_id: Option<i64>,
    /// First night the rule covers (inclusive)
    pub valid_from: NaiveDate,
    /// Last night the rule covers (inclusive)
    pub valid_until: NaiveDate,
    /// Absolute nightly price in currency unit; replaces the base outright
    pub base_price_override: Option<f64>,
    /// Multiplier on the base nightly price (1.5 = +50%)
    pub price_modifier: Option<f64>,
    /// Minimum total stay length (nights) for the rule to permit the quote
    pub min_stay: Option<u32>,
    /// Maximum total stay length (nights)
    pub max_stay: Option<u32>,
    pub is_active: bool,
    /// Creation timestamp (Unix millis); tie-break key for overlapping rules
    pub created_at: i64,
}

impl PricingRule {
    /// Whether the validity window covers the given night
    pub fn covers(&self, night: NaiveDate) -> bool {
        self.valid_from <= night && night <= self.valid_until
    }

    /// Whether a total stay length satisfies the rule's min/max bounds
    pub fn admits_stay(&self, nights: u32) -> bool {
        if let Some(min) = self.min_stay
            && nights < min
        {
            return false;
        }
        if let Some(max) = self.max_stay
            && nights > max
        {
            return false;
        }
        true
    }
}
