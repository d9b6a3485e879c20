/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at property scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Collapse an optional string to a single "absent" representation.
///
/// Older data encodes missing fields as `""`, `null`, or whitespace. This
/// runs once at the boundary so business logic only ever sees `None`.
pub fn normalize_opt_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_ids_are_positive_and_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        // Same millisecond is possible; the random bits make collisions
        // vanishingly unlikely but not impossible, so only sanity-check.
        assert!(a <= (1i64 << 53));
    }

    #[test]
    fn test_normalize_opt_string() {
        assert_eq!(normalize_opt_string(None), None);
        assert_eq!(normalize_opt_string(Some("".to_string())), None);
        assert_eq!(normalize_opt_string(Some("   ".to_string())), None);
        assert_eq!(
            normalize_opt_string(Some("  a@b.c ".to_string())),
            Some("a@b.c".to_string())
        );
    }
}
