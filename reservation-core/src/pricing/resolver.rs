//! Rate Resolver
//!
//! Computes the nightly price schedule for a stay request from the active
//! pricing rules, validates stay-length bounds, and sums the quote total.
//!
//! The resolver is a pure function of (request, rule set, catalog):
//! identical inputs against an unchanged rule set reproduce an identical
//! quote. No clock, no randomness.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::PricingRule;
use thiserror::Error;

use super::matcher::{matches_night, select_winner};
use crate::catalog::{PropertyCatalog, ServiceCatalog};
use crate::money::{round_money, to_decimal, to_f64};

/// Rate resolution errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RateError {
    #[error("property not found: {0}")]
    PropertyNotFound(i64),

    #[error("room type not found: {room_type_id} at property {property_id}")]
    RoomTypeNotFound { property_id: i64, room_type_id: i64 },

    #[error("service not found: {0}")]
    ServiceNotFound(i64),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error(
        "stay length not permitted: {nights} nights violates rule {rule_id} \
         bounds (min {min:?}, max {max:?})"
    )]
    StayLengthRejected {
        rule_id: i64,
        nights: u32,
        min: Option<u32>,
        max: Option<u32>,
    },
}

/// Quote request: the inputs rate resolution is a pure function of
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub property_id: i64,
    pub room_type_id: i64,
    /// Arrival date; the stay window is [check_in, check_out)
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    /// Selected add-on service IDs
    pub service_ids: Vec<i64>,
}

/// One night of the resolved schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NightlyRate {
    pub date: NaiveDate,
    /// Final nightly price in currency unit
    pub amount: f64,
    /// Rule that produced the price; None = undiscounted base price
    pub rule_id: Option<i64>,
}

/// Resolved quote: nightly schedule plus services subtotal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateQuote {
    pub nights: Vec<NightlyRate>,
    pub room_subtotal: f64,
    pub services_subtotal: f64,
    pub total: f64,
}

/// Apply a rule's effect to the base nightly price.
///
/// An absolute override replaces the price outright; a multiplicative
/// modifier scales it. The override wins when both are present.
fn apply_effect(rule: &PricingRule, base: Decimal) -> Decimal {
    if let Some(override_price) = rule.base_price_override {
        return to_decimal(override_price);
    }
    if let Some(modifier) = rule.price_modifier {
        return base * to_decimal(modifier);
    }
    base
}

/// Resolve the nightly price schedule and quote total for a stay request.
///
/// For each night of [check_in, check_out), the active rules covering that
/// night are ranked (room-type scope over all-types, then most recently
/// created) and the winner's effect is applied to the room type's base
/// nightly price. Every rule that won at least one night must admit the
/// total stay length, or the whole quote is rejected.
pub fn resolve_rate(
    request: &QuoteRequest,
    rules: &[PricingRule],
    properties: &dyn PropertyCatalog,
    services: &dyn ServiceCatalog,
) -> Result<RateQuote, RateError> {
    if !properties.property_exists(request.property_id) {
        return Err(RateError::PropertyNotFound(request.property_id));
    }
    let room_type = properties
        .room_type(request.property_id, request.room_type_id)
        .ok_or(RateError::RoomTypeNotFound {
            property_id: request.property_id,
            room_type_id: request.room_type_id,
        })?;

    if request.check_in >= request.check_out {
        return Err(RateError::InvalidRange(format!(
            "check-in {} must precede check-out {}",
            request.check_in, request.check_out
        )));
    }
    let nights_total = (request.check_out - request.check_in).num_days() as u32;

    if request.guest_count < 1 {
        return Err(RateError::InvalidRange(format!(
            "guest count must be positive, got {}",
            request.guest_count
        )));
    }
    if request.guest_count > room_type.capacity {
        return Err(RateError::InvalidRange(format!(
            "guest count {} exceeds room type capacity {}",
            request.guest_count, room_type.capacity
        )));
    }

    let base = to_decimal(room_type.base_nightly_price);
    let mut nights = Vec::with_capacity(nights_total as usize);
    let mut contributing: Vec<&PricingRule> = Vec::new();
    let mut room_subtotal = Decimal::ZERO;

    for night in request.check_in.iter_days().take(nights_total as usize) {
        let candidates: Vec<&PricingRule> = rules
            .iter()
            .filter(|r| matches_night(r, request.property_id, request.room_type_id, night))
            .collect();
        let winner = select_winner(&candidates);

        let amount = round_money(match winner {
            Some(rule) => apply_effect(rule, base),
            None => base,
        });
        room_subtotal += amount;

        if let Some(rule) = winner
            && !contributing.iter().any(|c| c.id == rule.id)
        {
            contributing.push(rule);
        }

        nights.push(NightlyRate {
            date: night,
            amount: to_f64(amount),
            rule_id: winner.map(|r| r.id),
        });
    }

    // A rule that priced any night gets a say on the whole stay length.
    // Violations reject the quote instead of silently dropping the rule.
    for rule in &contributing {
        if !rule.admits_stay(nights_total) {
            return Err(RateError::StayLengthRejected {
                rule_id: rule.id,
                nights: nights_total,
                min: rule.min_stay,
                max: rule.max_stay,
            });
        }
    }

    let mut services_subtotal = Decimal::ZERO;
    for service_id in &request.service_ids {
        let unit_price = services
            .service_price(*service_id)
            .ok_or(RateError::ServiceNotFound(*service_id))?;
        services_subtotal += to_decimal(unit_price);
    }

    Ok(RateQuote {
        nights,
        room_subtotal: to_f64(room_subtotal),
        services_subtotal: to_f64(services_subtotal),
        total: to_f64(room_subtotal + services_subtotal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    const PROPERTY: i64 = 1;
    const ROOM_TYPE: i64 = 7;

    fn catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_room_type(PROPERTY, ROOM_TYPE, 100.0, 4);
        catalog.add_service(500, 25.0);
        catalog.add_service(501, 10.5);
        catalog
    }

    fn request(from: (i32, u32, u32), until: (i32, u32, u32)) -> QuoteRequest {
        QuoteRequest {
            property_id: PROPERTY,
            room_type_id: ROOM_TYPE,
            check_in: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(until.0, until.1, until.2).unwrap(),
            guest_count: 2,
            service_ids: vec![],
        }
    }

    fn make_rule(id: i64, room_type_id: Option<i64>) -> PricingRule {
        PricingRule {
            id,
            property_id: PROPERTY,
            room_type_id,
            valid_from: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2024, 12, 26).unwrap(),
            base_price_override: None,
            price_modifier: None,
            min_stay: None,
            max_stay: None,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_no_rules_uses_base_price() {
        let quote = resolve_rate(
            &request((2024, 12, 24), (2024, 12, 26)),
            &[],
            &catalog(),
            &catalog(),
        )
        .unwrap();

        assert_eq!(quote.nights.len(), 2);
        assert!(quote.nights.iter().all(|n| n.amount == 100.0));
        assert!(quote.nights.iter().all(|n| n.rule_id.is_none()));
        assert_eq!(quote.room_subtotal, 200.0);
        assert_eq!(quote.total, 200.0);
    }

    #[test]
    fn test_modifier_scales_base_price() {
        // Base 100.00, modifier 1.5 over 2024-12-20..26:
        // a 2024-12-24..26 quote is [150.00, 150.00], total 300.00
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.price_modifier = Some(1.5);

        let quote = resolve_rate(
            &request((2024, 12, 24), (2024, 12, 26)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap();

        assert_eq!(
            quote.nights.iter().map(|n| n.amount).collect::<Vec<_>>(),
            vec![150.0, 150.0]
        );
        assert_eq!(quote.total, 300.0);
    }

    #[test]
    fn test_override_replaces_price_and_beats_modifier() {
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.base_price_override = Some(80.0);
        rule.price_modifier = Some(1.5); // ignored: override wins

        let quote = resolve_rate(
            &request((2024, 12, 24), (2024, 12, 26)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap();

        assert!(quote.nights.iter().all(|n| n.amount == 80.0));
        assert_eq!(quote.total, 160.0);
    }

    #[test]
    fn test_room_type_rule_wins_over_all_types_rule() {
        let mut scoped = make_rule(1, Some(ROOM_TYPE));
        scoped.base_price_override = Some(120.0);
        scoped.created_at = 0;

        let mut general = make_rule(2, None);
        general.base_price_override = Some(60.0);
        general.created_at = 999; // newer, but less specific

        // Regardless of insertion order
        for rules in [
            vec![scoped.clone(), general.clone()],
            vec![general.clone(), scoped.clone()],
        ] {
            let quote = resolve_rate(
                &request((2024, 12, 24), (2024, 12, 26)),
                &rules,
                &catalog(),
                &catalog(),
            )
            .unwrap();
            assert!(quote.nights.iter().all(|n| n.amount == 120.0));
            assert!(quote.nights.iter().all(|n| n.rule_id == Some(1)));
        }
    }

    #[test]
    fn test_partial_overlap_mixes_rule_and_base_nights() {
        // Rule covers 20..26 inclusive; stay 2024-12-25..28 = nights 25, 26, 27
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.price_modifier = Some(2.0);

        let quote = resolve_rate(
            &request((2024, 12, 25), (2024, 12, 28)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap();

        assert_eq!(
            quote.nights.iter().map(|n| n.amount).collect::<Vec<_>>(),
            vec![200.0, 200.0, 100.0]
        );
        assert_eq!(quote.nights[2].rule_id, None);
        assert_eq!(quote.total, 500.0);
    }

    #[test]
    fn test_min_stay_rejects_short_request() {
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.price_modifier = Some(1.5);
        rule.min_stay = Some(3);

        let err = resolve_rate(
            &request((2024, 12, 24), (2024, 12, 26)),
            &[rule.clone()],
            &catalog(),
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RateError::StayLengthRejected {
                rule_id: 1,
                nights: 2,
                ..
            }
        ));

        // Same request with 3 nights succeeds
        let quote = resolve_rate(
            &request((2024, 12, 23), (2024, 12, 26)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap();
        assert_eq!(quote.total, 450.0);
    }

    #[test]
    fn test_max_stay_rejects_long_request() {
        let mut rule = make_rule(1, None);
        rule.price_modifier = Some(0.9);
        rule.max_stay = Some(2);

        let err = resolve_rate(
            &request((2024, 12, 23), (2024, 12, 26)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, RateError::StayLengthRejected { .. }));
    }

    #[test]
    fn test_non_contributing_rule_bounds_are_ignored() {
        // Rule on a different room type never prices a night, so its
        // min_stay has no say on this quote.
        let mut other = make_rule(1, Some(ROOM_TYPE + 1));
        other.min_stay = Some(10);

        let quote = resolve_rate(
            &request((2024, 12, 24), (2024, 12, 26)),
            &[other],
            &catalog(),
            &catalog(),
        )
        .unwrap();
        assert_eq!(quote.total, 200.0);
    }

    #[test]
    fn test_services_added_to_total() {
        let mut req = request((2024, 12, 24), (2024, 12, 26));
        req.service_ids = vec![500, 501];

        let quote = resolve_rate(&req, &[], &catalog(), &catalog()).unwrap();
        assert_eq!(quote.room_subtotal, 200.0);
        assert_eq!(quote.services_subtotal, 35.5);
        assert_eq!(quote.total, 235.5);
    }

    #[test]
    fn test_unknown_service_rejected() {
        let mut req = request((2024, 12, 24), (2024, 12, 26));
        req.service_ids = vec![999];

        let err = resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err();
        assert_eq!(err, RateError::ServiceNotFound(999));
    }

    #[test]
    fn test_unknown_property_and_room_type() {
        let mut req = request((2024, 12, 24), (2024, 12, 26));
        req.property_id = 42;
        assert_eq!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::PropertyNotFound(42)
        );

        let mut req = request((2024, 12, 24), (2024, 12, 26));
        req.room_type_id = 42;
        assert!(matches!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::RoomTypeNotFound { .. }
        ));
    }

    #[test]
    fn test_inverted_and_empty_ranges_rejected() {
        let req = request((2024, 12, 26), (2024, 12, 24));
        assert!(matches!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::InvalidRange(_)
        ));

        let req = request((2024, 12, 24), (2024, 12, 24));
        assert!(matches!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::InvalidRange(_)
        ));
    }

    #[test]
    fn test_guest_count_bounds() {
        let mut req = request((2024, 12, 24), (2024, 12, 26));
        req.guest_count = 0;
        assert!(matches!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::InvalidRange(_)
        ));

        req.guest_count = 5; // capacity is 4
        assert!(matches!(
            resolve_rate(&req, &[], &catalog(), &catalog()).unwrap_err(),
            RateError::InvalidRange(_)
        ));
    }

    #[test]
    fn test_determinism_identical_inputs_identical_quote() {
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.price_modifier = Some(1.23);
        let rules = vec![rule];
        let req = request((2024, 12, 20), (2024, 12, 27));

        let a = resolve_rate(&req, &rules, &catalog(), &catalog()).unwrap();
        let b = resolve_rate(&req, &rules, &catalog(), &catalog()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractional_modifier_rounds_per_night() {
        // 100.00 * 1.333 = 133.30 per night, not accumulated drift
        let mut rule = make_rule(1, Some(ROOM_TYPE));
        rule.price_modifier = Some(1.333);

        let quote = resolve_rate(
            &request((2024, 12, 20), (2024, 12, 23)),
            &[rule],
            &catalog(),
            &catalog(),
        )
        .unwrap();
        assert!(quote.nights.iter().all(|n| n.amount == 133.3));
        assert_eq!(quote.room_subtotal, 399.9);
    }
}
