use proptest::prelude::*;

use doppelcheck_types::{Hash256, Timestamp, TrustMetrics};

proptest! {
    /// Hash256 hex roundtrip: to_hex -> from_hex produces identical digest.
    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash256::new(bytes);
        let parsed = Hash256::from_hex(&hash.to_hex()).unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Hash256 JSON roundtrip through its hex string form.
    #[test]
    fn hash_json_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash256::new(bytes);
        let encoded = serde_json::to_string(&hash).unwrap();
        let decoded: Hash256 = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Timestamps survive the ISO-8601 string form without drift.
    #[test]
    fn timestamp_iso_roundtrip(micros in 0i64..4_102_444_800_000_000i64) {
        let ts = Timestamp::from_micros(micros);
        let parsed = Timestamp::parse_iso8601(&ts.to_iso8601()).unwrap();
        prop_assert_eq!(parsed, ts);
    }

    /// Timestamp ordering follows the underlying microsecond count.
    #[test]
    fn timestamp_ordering(a in 0i64..i64::MAX, b in 0i64..i64::MAX) {
        let ta = Timestamp::from_micros(a);
        let tb = Timestamp::from_micros(b);
        prop_assert_eq!(ta <= tb, a <= b);
    }

    /// Any four values in [0, 1] form valid metrics.
    #[test]
    fn metrics_accept_unit_interval(
        a in 0.0f64..=1.0, b in 0.0f64..=1.0, c in 0.0f64..=1.0, d in 0.0f64..=1.0,
    ) {
        prop_assert!(TrustMetrics::new(a, b, c, d).is_ok());
    }

    /// Anything above 1 is rejected.
    #[test]
    fn metrics_reject_above_one(x in 1.000001f64..1e9) {
        prop_assert!(TrustMetrics::new(x, 0.0, 0.0, 0.0).is_err());
    }
}
