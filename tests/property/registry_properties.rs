// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Registry Validation
//!
//! Each case builds a fresh seeded store, so properties never leak state
//! between generated inputs.

use proptest::prelude::*;
use serde_json::json;

use cim_inventory::{AllowListService, Category, InventoryError, InventoryRegistry};

use crate::fixtures::{payload, seeded_store};

// ============================================================================
// Generators
// ============================================================================

fn hostname_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,30}(\\.[a-z0-9]{1,10}){0,2}"
}

/// Values that are never seeded by the fixtures
fn fresh_value_strategy() -> impl Strategy<Value = String> {
    "zz-[a-z0-9._-]{1,20}"
}

fn classifying_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::CLASSIFYING.to_vec())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Once a value is accepted, a record using it is accepted
    #[test]
    fn prop_added_value_passes(
        hostname in hostname_strategy(),
        category in classifying_strategy(),
        value in fresh_value_strategy(),
    ) {
        let result = tokio_test::block_on(async {
            let store = seeded_store().await;
            let allow_lists = AllowListService::new(store.clone());
            let registry = InventoryRegistry::new(store);

            allow_lists.add_value(category, &value).await.unwrap();
            let mut body = json!({"hostname": hostname});
            body[category.as_str()] = json!(value);
            registry.create(&payload(body)).await
        });

        let fields = result.unwrap().fields();
        prop_assert_eq!(fields.classifying(category), Some(value.as_str()));
    }

    /// A value never accepted is always rejected and nothing is written
    #[test]
    fn prop_unknown_value_rejected(
        hostname in hostname_strategy(),
        category in classifying_strategy(),
        value in fresh_value_strategy(),
    ) {
        let (result, stored) = tokio_test::block_on(async {
            let registry = InventoryRegistry::new(seeded_store().await);

            let mut body = json!({"hostname": hostname});
            body[category.as_str()] = json!(value);
            let result = registry.create(&payload(body)).await;
            (result, registry.list_all().await.unwrap())
        });

        prop_assert!(matches!(result, Err(InventoryError::Validation(_))));
        prop_assert!(stored.is_empty());
    }

    /// Empty strings are rejected for every category and every tag position
    #[test]
    fn prop_empty_string_rejected(
        hostname in hostname_strategy(),
        category in classifying_strategy(),
        position in 0usize..3,
    ) {
        let (field, tags) = tokio_test::block_on(async {
            let registry = InventoryRegistry::new(seeded_store().await);

            let mut body = json!({"hostname": hostname});
            body[category.as_str()] = json!("");
            let field = registry.create(&payload(body)).await;

            let mut tags = vec![json!("pci"); 3];
            tags[position] = json!("");
            let tags = registry
                .create(&payload(json!({"hostname": hostname, "tags": tags})))
                .await;
            (field, tags)
        });

        prop_assert!(matches!(field, Err(InventoryError::Validation(_))));
        prop_assert!(matches!(tags, Err(InventoryError::Validation(_))));
    }

    /// Create followed by get returns the record that was created
    #[test]
    fn prop_create_get_round_trip(hostname in hostname_strategy(), with_tags in any::<bool>()) {
        let (created, fetched) = tokio_test::block_on(async {
            let registry = InventoryRegistry::new(seeded_store().await);

            let mut body = json!({"hostname": hostname, "environment": "dev"});
            if with_tags {
                body["tags"] = json!(["pci"]);
            }
            let created = registry.create(&payload(body)).await.unwrap();
            let fetched = registry.get_by_hostname(&hostname).await.unwrap();
            (created, fetched)
        });

        prop_assert_eq!(&created, &fetched);
        prop_assert_eq!(fetched.hostname, hostname);
        prop_assert_eq!(fetched.tags.is_some(), with_tags);
    }

    /// Deleting any number of times always succeeds and leaves the host absent
    #[test]
    fn prop_delete_is_idempotent(hostname in hostname_strategy(), repeats in 1usize..4) {
        let outcome = tokio_test::block_on(async {
            let registry = InventoryRegistry::new(seeded_store().await);
            registry
                .create(&payload(json!({"hostname": hostname})))
                .await
                .unwrap();

            for _ in 0..repeats {
                registry.delete(&hostname).await.unwrap();
            }
            registry.get_by_hostname(&hostname).await
        });

        prop_assert!(matches!(outcome, Err(InventoryError::NotFound(_))));
    }
}
