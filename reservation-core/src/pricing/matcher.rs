//! Pricing Rule Matcher
//!
//! Logic for matching rules to stay nights and ranking overlapping rules.

use chrono::NaiveDate;
use shared::models::PricingRule;

/// Check if a rule applies to one night of a stay request
pub fn matches_night(
    rule: &PricingRule,
    property_id: i64,
    room_type_id: i64,
    night: NaiveDate,
) -> bool {
    if !rule.is_active {
        return false;
    }
    if rule.property_id != property_id {
        return false;
    }
    if let Some(scoped) = rule.room_type_id
        && scoped != room_type_id
    {
        return false;
    }
    rule.covers(night)
}

/// Scope specificity: an exact room-type rule outranks an all-types rule
pub fn specificity(rule: &PricingRule) -> u8 {
    match rule.room_type_id {
        Some(_) => 1,
        None => 0,
    }
}

/// Select the winning rule for a night.
///
/// Ranking: highest specificity first; equal specificity breaks by
/// `created_at` descending (most recently created wins), then by `id`
/// descending so the order is total even under equal timestamps.
pub fn select_winner<'a>(candidates: &[&'a PricingRule]) -> Option<&'a PricingRule> {
    candidates
        .iter()
        .max_by(|a, b| {
            specificity(a)
                .cmp(&specificity(b))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rule(id: i64, room_type_id: Option<i64>, created_at: i64) -> PricingRule {
        PricingRule {
            id,
            property_id: 1,
            room_type_id,
            valid_from: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            base_price_override: None,
            price_modifier: None,
            min_stay: None,
            max_stay: None,
            is_active: true,
            created_at,
        }
    }

    fn night() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()
    }

    #[test]
    fn test_matches_night_scope_and_window() {
        let all_types = make_rule(1, None, 0);
        assert!(matches_night(&all_types, 1, 7, night()));
        assert!(!matches_night(&all_types, 2, 7, night()));

        let scoped = make_rule(2, Some(7), 0);
        assert!(matches_night(&scoped, 1, 7, night()));
        assert!(!matches_night(&scoped, 1, 8, night()));

        let outside = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(!matches_night(&all_types, 1, 7, outside));
    }

    #[test]
    fn test_inactive_rule_never_matches() {
        let mut rule = make_rule(1, None, 0);
        rule.is_active = false;
        assert!(!matches_night(&rule, 1, 7, night()));
    }

    #[test]
    fn test_room_type_scope_outranks_all_types() {
        let all_types = make_rule(1, None, 100);
        let scoped = make_rule(2, Some(7), 0); // older, but more specific
        let winner = select_winner(&[&all_types, &scoped]).unwrap();
        assert_eq!(winner.id, 2);

        // Insertion order must not matter
        let winner = select_winner(&[&scoped, &all_types]).unwrap();
        assert_eq!(winner.id, 2);
    }

    #[test]
    fn test_equal_specificity_most_recent_wins() {
        let older = make_rule(1, Some(7), 100);
        let newer = make_rule(2, Some(7), 200);
        let winner = select_winner(&[&older, &newer]).unwrap();
        assert_eq!(winner.id, 2);
    }

    #[test]
    fn test_equal_created_at_highest_id_wins() {
        let a = make_rule(1, None, 100);
        let b = make_rule(2, None, 100);
        assert_eq!(select_winner(&[&a, &b]).unwrap().id, 2);
        assert_eq!(select_winner(&[&b, &a]).unwrap().id, 2);
    }

    #[test]
    fn test_no_candidates() {
        assert!(select_winner(&[]).is_none());
    }
}
