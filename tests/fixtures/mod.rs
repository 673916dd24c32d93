// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-inventory
//!
//! Provides deterministic allow-lists and payloads shared by the integration
//! tests. Every store built here starts from the same seeded state.
#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;

use cim_inventory::domain::Payload;
use cim_inventory::{Category, InventoryStore, MemoryStore, StoreSession};

/// Allow-list values seeded into every fixture store
pub const SEEDED_VALUES: &[(Category, &str)] = &[
    (Category::Environment, "prod"),
    (Category::Environment, "dev"),
    (Category::Solution, "billing"),
    (Category::System, "api"),
    (Category::Os, "debian-12"),
    (Category::Tags, "pci"),
];

/// A valid value for each category, taken from [`SEEDED_VALUES`]
pub fn seeded_value(category: Category) -> &'static str {
    SEEDED_VALUES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, v)| *v)
        .expect("every category is seeded")
}

/// Provisioned store with [`SEEDED_VALUES`] accepted
///
/// The tags allow-list deliberately lacks `edge`.
pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.ensure_schema().await.expect("schema");

    let mut session = store.session().await.expect("session");
    for (category, value) in SEEDED_VALUES {
        session
            .insert_value(*category, value)
            .await
            .expect("seed allow-list value");
    }

    Arc::new(store)
}

/// Convert a `json!` object literal into a request payload
pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("payload fixture must be a JSON object, got {}", other),
    }
}
