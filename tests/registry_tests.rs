// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for the registry and allow-list services
//!
//! These tests verify the complete write flow:
//! 1. Allow-list values are added
//! 2. Records are validated against them on create/update
//! 3. Reads return exactly what was persisted

mod fixtures;

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

use cim_inventory::domain::ValidationError;
use cim_inventory::{
    AllowListService, Category, InventoryError, InventoryRegistry, InventoryStore, MemoryStore,
    ServerFields, ServerRecord, StoreSession,
};
use fixtures::{payload, seeded_store, seeded_value};

async fn services() -> (AllowListService<MemoryStore>, InventoryRegistry<MemoryStore>) {
    let store = seeded_store().await;
    (
        AllowListService::new(store.clone()),
        InventoryRegistry::new(store),
    )
}

/// Test: create then get returns exactly the supplied fields
#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (_, registry) = services().await;

    let created = registry
        .create(&payload(json!({
            "hostname": "db-1",
            "environment": "prod",
            "solution": "billing",
            "system": "api",
            "os": "debian-12",
            "tags": ["pci"],
        })))
        .await
        .expect("create");

    let fetched = registry.get_by_hostname("db-1").await.expect("get");
    assert_eq!(fetched, created);
    assert_eq!(
        fetched,
        ServerRecord {
            hostname: "db-1".to_string(),
            environment: Some("prod".to_string()),
            solution: Some("billing".to_string()),
            system: Some("api".to_string()),
            os: Some("debian-12".to_string()),
            tags: Some(vec!["pci".to_string()]),
        }
    );
}

/// Test: second create of the same hostname conflicts and leaves the first intact
#[tokio::test]
async fn test_double_create_conflicts() {
    let (_, registry) = services().await;

    registry
        .create(&payload(json!({"hostname": "db-1", "environment": "prod"})))
        .await
        .expect("first create");

    let err = registry
        .create(&payload(json!({"hostname": "db-1", "environment": "dev"})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Conflict(ref h) if h == "db-1"));

    let all = registry.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].environment.as_deref(), Some("prod"));
}

#[test_case(Category::Environment ; "environment")]
#[test_case(Category::Solution ; "solution")]
#[test_case(Category::System ; "system")]
#[test_case(Category::Os ; "os")]
#[tokio::test]
async fn test_added_value_passes_validation(category: Category) {
    let (allow_lists, registry) = services().await;

    allow_lists.add_value(category, "fresh").await.unwrap();
    assert!(allow_lists.exists(category, "fresh").await.unwrap());

    let mut body = json!({"hostname": "host-a"});
    body[category.as_str()] = json!("fresh");
    registry.create(&payload(body.clone())).await.expect("create");

    registry
        .update("host-a", &payload(body))
        .await
        .expect("update");
}

#[test_case(Category::Environment ; "environment")]
#[test_case(Category::Solution ; "solution")]
#[test_case(Category::System ; "system")]
#[test_case(Category::Os ; "os")]
#[tokio::test]
async fn test_unknown_value_rejected(category: Category) {
    let (_, registry) = services().await;

    let mut body = json!({"hostname": "host-a"});
    body[category.as_str()] = json!("never-added");

    let err = registry.create(&payload(body.clone())).await.unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::InvalidValue { category: c, ref value })
            if c == category && value == "never-added"
    ));
    assert!(registry.get_by_hostname("host-a").await.is_err());

    registry
        .create(&payload(json!({"hostname": "host-a"})))
        .await
        .unwrap();
    let err = registry.update("host-a", &payload(body)).await.unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));
}

#[test_case(Category::Environment ; "environment")]
#[test_case(Category::Solution ; "solution")]
#[test_case(Category::System ; "system")]
#[test_case(Category::Os ; "os")]
#[tokio::test]
async fn test_empty_value_always_rejected(category: Category) {
    let (allow_lists, registry) = services().await;

    let mut body = json!({"hostname": "host-a"});
    body[category.as_str()] = json!("");

    let err = registry.create(&payload(body)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Field '{}' cannot be empty. At least you need to assign the value 'unknown'.",
            category
        )
    );
    assert!(allow_lists.add_value(category, "").await.is_err());
}

#[tokio::test]
async fn test_empty_tag_rejected() {
    let (_, registry) = services().await;

    let err = registry
        .create(&payload(json!({"hostname": "host-a", "tags": ["pci", ""]})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(ValidationError::EmptyTag)));
}

#[tokio::test]
async fn test_tags_must_be_array() {
    let (_, registry) = services().await;

    let err = registry
        .create(&payload(json!({"hostname": "host-a", "tags": "pci"})))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Field 'tags' must be an array");
}

/// Test: update validates tags the same way create does
#[tokio::test]
async fn test_update_rejects_bad_tags() {
    let (_, registry) = services().await;
    registry
        .create(&payload(json!({"hostname": "db-1", "tags": ["pci"]})))
        .await
        .unwrap();

    let err = registry
        .update("db-1", &payload(json!({"tags": ["pci", "edge"]})))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid tag 'edge'");

    let err = registry
        .update("db-1", &payload(json!({"tags": "pci"})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(ValidationError::TagsNotArray)));

    let stored = registry.get_by_hostname("db-1").await.unwrap();
    assert_eq!(stored.tags, Some(vec!["pci".to_string()]));
}

/// Test: NUL can never be stored, so it is a client error everywhere
#[tokio::test]
async fn test_nul_values_are_client_errors() {
    let store = seeded_store().await;
    let allow_lists = AllowListService::new(store.clone());
    let registry = InventoryRegistry::new(store.clone());

    // Even if a store held such a value, it is not accepted
    let mut session = store.session().await.unwrap();
    session
        .insert_value(Category::Environment, "pr\u{0}od")
        .await
        .unwrap();

    let err = registry
        .create(&payload(json!({"hostname": "db-1", "environment": "pr\u{0}od"})))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::InvalidValue {
            category: Category::Environment,
            ..
        })
    ));

    let err = registry
        .create(&payload(json!({"hostname": "db-1", "tags": ["e\u{0}dge"]})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(ValidationError::InvalidTag(_))));

    let err = registry.get_by_hostname("a\u{0}b").await.unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(_)));
    let err = registry
        .update("a\u{0}b", &payload(json!({"environment": "prod"})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(_)));
    registry.delete("a\u{0}b").await.expect("delete is a no-op");

    let err = allow_lists
        .add_value(Category::Os, "deb\u{0}ian")
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));
    assert!(!allow_lists.exists(Category::Os, "deb\u{0}ian").await.unwrap());
}

/// Test: delete is idempotent and leaves the hostname absent
#[tokio::test]
async fn test_delete_is_idempotent() {
    let (_, registry) = services().await;
    registry
        .create(&payload(json!({"hostname": "db-1"})))
        .await
        .unwrap();

    registry.delete("db-1").await.expect("first delete");
    registry.delete("db-1").await.expect("second delete");
    registry.delete("never-existed").await.expect("unknown delete");

    let err = registry.get_by_hostname("db-1").await.unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(_)));
}

#[tokio::test]
async fn test_update_missing_hostname_is_not_found() {
    let (_, registry) = services().await;

    let err = registry
        .update("ghost", &payload(json!({"environment": "prod"})))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(ref h) if h == "ghost"));
}

/// Scenario: tag not yet accepted, then accepted, then full-overwrite update
#[tokio::test]
async fn test_web1_scenario() {
    let (allow_lists, registry) = services().await;
    let body = json!({"hostname": "web-1", "environment": "prod", "tags": ["edge"]});

    // Step 1: tag not in the allow-list
    let err = registry.create(&payload(body.clone())).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid tag 'edge'");
    assert!(matches!(
        registry.get_by_hostname("web-1").await,
        Err(InventoryError::NotFound(_))
    ));

    // Step 2: accept the tag and retry
    allow_lists.add_value(Category::Tags, "edge").await.unwrap();
    registry.create(&payload(body)).await.expect("create");

    let record = registry.get_by_hostname("web-1").await.unwrap();
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "hostname": "web-1",
            "environment": "prod",
            "tags": ["edge"],
            "solution": null,
            "system": null,
            "os": null,
        })
    );

    // Step 3: full overwrite clears omitted fields
    registry
        .update(
            "web-1",
            &payload(json!({"environment": "dev", "os": seeded_value(Category::Os)})),
        )
        .await
        .unwrap();
    registry
        .update("web-1", &payload(json!({"environment": "dev"})))
        .await
        .unwrap();

    let record = registry.get_by_hostname("web-1").await.unwrap();
    assert_eq!(record.environment.as_deref(), Some("dev"));
    assert_eq!(record.solution, None);
    assert_eq!(record.system, None);
    assert_eq!(record.os, None);
    assert_eq!(record.tags, None);
}

/// Test: reads never touch the allow-list tables
#[tokio::test]
async fn test_reads_do_not_consult_allow_lists() {
    let store = MemoryStore::new();
    let mut session = store.session().await.unwrap();
    session
        .insert_server(&ServerRecord::new("db-1", ServerFields::default()))
        .await
        .unwrap();

    let registry = InventoryRegistry::new(Arc::new(store));
    let listed = registry.list_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(registry.get_by_hostname("db-1").await.unwrap().hostname, "db-1");

    // Writes do, and fail on the missing tables
    let err = registry
        .update("db-1", &payload(json!({})))
        .await
        .unwrap_err();
    assert!(err.is_server_fault());
}

#[tokio::test]
async fn test_list_categories_reflects_additions() {
    let (allow_lists, _) = services().await;
    allow_lists.add_value(Category::Tags, "edge").await.unwrap();

    let lists = allow_lists.list_categories().await.unwrap();
    assert_eq!(lists.environment, vec!["prod", "dev"]);
    assert_eq!(lists.tags, vec!["pci", "edge"]);
}
