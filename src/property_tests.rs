//! Property-Based Tests
//!
//! Uses proptest to check key normalization and local-memory store invariants.

use proptest::prelude::*;

use crate::backend::Expiry;
use crate::cache::CacheStore;
use crate::key::{cache_key, normalize, KeyPart, MAX_KEY_LENGTH};
use crate::value::cache_value;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_EXPIRY: Expiry = Expiry::Seconds(300);

// == Strategies ==
/// Arbitrary key parts, including unsafe and non-ASCII text
fn key_part_strategy() -> impl Strategy<Value = KeyPart> {
    prop_oneof![
        any::<String>().prop_map(KeyPart::Text),
        "[a-z _:./-]{0,40}".prop_map(KeyPart::Text),
        any::<i64>().prop_map(KeyPart::Int),
        any::<u64>().prop_map(KeyPart::UInt),
        any::<bool>().prop_map(KeyPart::Bool),
        Just(KeyPart::Null),
    ]
}

fn store_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (store_key_strategy(), any::<u32>()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        store_key_strategy().prop_map(|key| StoreOp::Get { key }),
        store_key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_key_is_safe_and_bounded(parts in prop::collection::vec(key_part_strategy(), 0..20)) {
        let key = normalize(&parts);

        prop_assert!(key.len() <= MAX_KEY_LENGTH, "Key too long: {}", key.len());
        prop_assert!(
            key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "Unsafe character in {}",
            key
        );
    }

    #[test]
    fn prop_long_keys_strip_underscores_before_truncating(
        chars in prop::collection::vec(prop_oneof![Just('_'), Just('a'), Just('7'), Just('-')], 251..500)
    ) {
        let raw: String = chars.into_iter().collect();
        let stripped: String = raw.chars().filter(|&c| c != '_').collect();

        let key = cache_key(raw.as_str());

        if stripped.len() <= MAX_KEY_LENGTH {
            prop_assert_eq!(key, stripped);
        } else {
            prop_assert_eq!(key.as_str(), &stripped[..MAX_KEY_LENGTH]);
        }
    }

    #[test]
    fn prop_sequence_forms_are_equivalent(parts in prop::collection::vec(key_part_strategy(), 0..10)) {
        let from_slice = cache_key(parts.as_slice());
        let from_vec_ref = cache_key(&parts);
        let from_vec = cache_key(parts.clone());

        prop_assert_eq!(&from_slice, &from_vec);
        prop_assert_eq!(&from_vec_ref, &from_vec);
    }

    #[test]
    fn prop_scalar_equals_singleton(part in key_part_strategy()) {
        prop_assert_eq!(cache_key(part.clone()), cache_key([part]));
    }

    #[test]
    fn prop_short_keys_concatenate(parts in prop::collection::vec("[a-zA-Z0-9_-]{0,10}", 0..10)) {
        // Already-safe text under the length limit passes through unchanged
        let expected: String = parts.concat();
        prop_assert_eq!(cache_key(parts), expected);
    }

    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, Some(cache_value(value)), TEST_EXPIRY).unwrap();
                }
                StoreOp::Get { key } => {
                    if store.contains(&key) {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    store.get(&key);
                }
                StoreOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
    }

    #[test]
    fn prop_roundtrip_storage(key in store_key_strategy(), value in any::<u32>()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(&key, Some(cache_value(value)), TEST_EXPIRY).unwrap();

        let retrieved = store.get(&key).and_then(|v| v.downcast_ref::<u32>().copied());
        prop_assert_eq!(retrieved, Some(value));
    }

    #[test]
    fn prop_delete_removes_entry(key in store_key_strategy(), value in any::<u32>()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(&key, Some(cache_value(value)), TEST_EXPIRY).unwrap();
        prop_assert!(store.delete(&key));
        prop_assert!(store.get(&key).is_none());
        prop_assert!(!store.contains(&key));
    }

    #[test]
    fn prop_overwrite_semantics(key in store_key_strategy(), first in any::<u32>(), second in any::<u32>()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(&key, Some(cache_value(first)), TEST_EXPIRY).unwrap();
        store.set(&key, Some(cache_value(second)), TEST_EXPIRY).unwrap();

        let retrieved = store.get(&key).and_then(|v| v.downcast_ref::<u32>().copied());
        prop_assert_eq!(retrieved, Some(second));
        prop_assert_eq!(store.len(), 1);
    }

    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec(store_key_strategy(), 1..200)
    ) {
        let max_entries = 50;
        let mut store = CacheStore::new(max_entries);

        for key in keys {
            store.set(&key, None, TEST_EXPIRY).unwrap();
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }
}
