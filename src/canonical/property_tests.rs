//! Property-Based Tests for Canonical Encoding
//!
//! Uses proptest to check the determinism guarantees cache keys rely on.

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::canonical::{encode, CanonicalValue};

// == Strategies ==
/// Generates arbitrary nested values with finite numbers.
fn value_strategy() -> impl Strategy<Value = CanonicalValue> {
    let leaf = prop_oneof![
        Just(CanonicalValue::Null),
        any::<bool>().prop_map(CanonicalValue::Bool),
        any::<i64>().prop_map(CanonicalValue::Int),
        // Dyadic fractions parse back exactly
        (-1_000_000i64..1_000_000).prop_map(|n| CanonicalValue::Float(n as f64 / 64.0)),
        "\\PC{0,16}".prop_map(CanonicalValue::String),
        "[\\x00-\\x1f\"\\\\]{0,8}".prop_map(CanonicalValue::String),
    ];

    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(CanonicalValue::List),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..6).prop_map(CanonicalValue::Map),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // *For any* mapping and any insertion order of its keys, the encoding
    // equals the one built from the keys in sorted order.
    #[test]
    fn prop_map_order_insensitive(
        (entries, shuffled) in prop::collection::hash_map("\\PC{1,8}", value_strategy(), 0..8)
            .prop_map(|fields| fields.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
    ) {
        let sorted: BTreeMap<String, CanonicalValue> = entries.iter().cloned().collect();
        let mut expected = b"{".to_vec();
        for (i, (key, value)) in sorted.iter().enumerate() {
            if i > 0 {
                expected.push(b',');
            }
            expected.extend(encode(&CanonicalValue::String(key.clone())));
            expected.push(b':');
            expected.extend(encode(value));
        }
        expected.push(b'}');

        let a: CanonicalValue = entries.into_iter().collect();
        let b: CanonicalValue = shuffled.into_iter().collect();

        prop_assert_eq!(encode(&a), expected.clone());
        prop_assert_eq!(encode(&b), expected);
    }

    // *For any* value, encoding twice yields the same bytes.
    #[test]
    fn prop_encoding_deterministic(value in value_strategy()) {
        let cloned = value.clone();
        prop_assert_eq!(encode(&value), encode(&cloned));
    }

    // *For any* value, the encoding is valid JSON carrying the same data.
    #[test]
    fn prop_encoding_is_json(value in value_strategy()) {
        let bytes = encode(&value);
        let parsed: serde_json::Value = serde_json::from_slice(&bytes)
            .expect("canonical bytes should parse as JSON");

        // Re-encoding the parsed form reproduces the same bytes
        prop_assert_eq!(encode(&CanonicalValue::from(parsed)), bytes);
    }

    // *For any* string, the encoding never contains a raw control character.
    #[test]
    fn prop_no_raw_control_chars(s in "\\PC*|[\\x00-\\x1f]{0,8}") {
        let bytes = encode(&CanonicalValue::String(s));
        prop_assert!(bytes.iter().all(|b| *b >= 0x20));
    }

    // *For any* two distinct lists, reordering elements changes the encoding.
    #[test]
    fn prop_list_order_significant(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let ab = CanonicalValue::from(vec![a, b]);
        let ba = CanonicalValue::from(vec![b, a]);
        prop_assert_ne!(encode(&ab), encode(&ba));
    }
}
