//! Property-Based Tests for the Rule Engine
//!
//! # Properties
//!
//! - **Idempotence**: evaluating a corrected set again changes nothing and
//!   reports nothing
//! - **Stability**: sets already within their limits come back unchanged
//! - **Bounds**: no corrected level exceeds its limit, and no axe keeps Sharpness
//!
//! ```bash
//! cargo test --lib limits::proptests
//! ```

use proptest::prelude::*;

use super::rules::evaluate;
use super::store::{Limit, LimitStore};
use crate::catalog::EnchantmentId;
use crate::item::{ItemCategory, ItemEnchantmentSet};

const KEYS: &[&str] = &["sharpness", "smite", "unbreaking", "efficiency", "mending", "looting"];

fn arb_category() -> impl Strategy<Value = ItemCategory> {
    prop_oneof![Just(ItemCategory::Axe), Just(ItemCategory::Other)]
}

// Distinct keys with levels 1..=10
fn arb_enchantments() -> impl Strategy<Value = ItemEnchantmentSet> {
    prop::collection::vec((0..KEYS.len(), 1u32..=10), 0..6).prop_map(|entries| {
        let mut set = ItemEnchantmentSet::new();
        for (index, level) in entries {
            let id = EnchantmentId::new(KEYS[index]);
            if !set.contains(&id) {
                set.insert(id, level);
            }
        }
        set
    })
}

// Optional limit per key, 0..=8
fn arb_limits() -> impl Strategy<Value = Vec<Option<u32>>> {
    prop::collection::vec(prop::option::of(0u32..=8), KEYS.len())
}

fn build_store(limits: &[Option<u32>]) -> LimitStore {
    let mut store = LimitStore::in_memory();
    for (key, limit) in KEYS.iter().zip(limits) {
        if let Some(limit) = limit {
            store
                .set(&EnchantmentId::new(key), Limit::Max(*limit))
                .expect("in-memory store accepts writes");
        }
    }
    store
}

proptest! {
    #[test]
    fn prop_evaluate_is_idempotent(
        category in arb_category(),
        enchantments in arb_enchantments(),
        limits in arb_limits()
    ) {
        let store = build_store(&limits);
        let first = evaluate(category, &enchantments, &store);
        let second = evaluate(category, &first.corrected, &store);

        prop_assert_eq!(&second.corrected, &first.corrected);
        prop_assert!(second.notifications.is_empty());
    }

    #[test]
    fn prop_within_limits_is_stable(
        enchantments in arb_enchantments(),
        limits in arb_limits()
    ) {
        // Raise every configured limit to at least the level present
        let store = build_store(&limits);
        let mut raised = LimitStore::in_memory();
        for (id, limit) in store.entries() {
            let level = enchantments.level(&id).unwrap_or(0);
            raised.set(&id, Limit::Max(limit.max(level))).unwrap();
        }

        let result = evaluate(ItemCategory::Other, &enchantments, &raised);
        prop_assert_eq!(&result.corrected, &enchantments);
        prop_assert!(result.notifications.is_empty());
    }

    #[test]
    fn prop_corrected_levels_within_bounds(
        category in arb_category(),
        enchantments in arb_enchantments(),
        limits in arb_limits()
    ) {
        let store = build_store(&limits);
        let result = evaluate(category, &enchantments, &store);

        for (id, level) in result.corrected.iter() {
            prop_assert!(level >= 1);
            if let Some(limit) = store.get(id).cap() {
                prop_assert!(level <= limit);
            }
        }
        if category == ItemCategory::Axe {
            prop_assert!(!result.corrected.contains(&EnchantmentId::sharpness()));
        }
        prop_assert!(result.corrected.len() <= enchantments.len());
    }
}
