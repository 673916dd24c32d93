// Copyright (c) 2025 - Cowboy AI, Inc.
//! Allow-List Service
//!
//! Maintains, per category, the set of values a server record may use.
//! Values are only ever added; there is no removal, so a value accepted once
//! stays valid and records written with it are never invalidated.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::invariants::is_storable;
use crate::domain::{AllowLists, Category, ValidationError};
use crate::errors::{InventoryError, InventoryResult};
use crate::store::{InventoryStore, StoreSession};

/// Fail with `CategoryNotProvisioned` for the first missing allow-list table
///
/// A missing table is a deployment fault, not a client error, and is checked
/// before any value is looked up.
pub(crate) async fn ensure_provisioned<T: StoreSession>(session: &mut T) -> InventoryResult<()> {
    match session.missing_categories().await?.first() {
        Some(&category) => Err(InventoryError::CategoryNotProvisioned(category)),
        None => Ok(()),
    }
}

/// Allow-list operations over an [`InventoryStore`]
pub struct AllowListService<S> {
    store: Arc<S>,
}

impl<S> Clone for AllowListService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: InventoryStore> AllowListService<S> {
    /// Create a service over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All accepted values, per category, in storage order
    pub async fn list_categories(&self) -> InventoryResult<AllowLists> {
        let mut session = self.store.session().await?;
        ensure_provisioned(&mut session).await?;

        let mut lists = AllowLists::default();
        for category in Category::ALL {
            let values = session.allowed_values(category).await?;
            lists.set_values(category, values);
        }
        Ok(lists)
    }

    /// Accept a new value for a category
    ///
    /// # Errors
    ///
    /// - `Validation` if the value is empty or contains NUL
    /// - `AlreadyExists` if the value is already accepted
    /// - `CategoryNotProvisioned` if the category table is missing
    pub async fn add_value(&self, category: Category, value: &str) -> InventoryResult<()> {
        if value.is_empty() {
            return Err(ValidationError::MissingAllowedValue { category }.into());
        }
        if !is_storable(value) {
            return Err(ValidationError::UnstorableValue { category }.into());
        }

        let mut session = self.store.session().await?;
        ensure_provisioned(&mut session).await?;
        session.insert_value(category, value).await?;

        info!("Added '{}' to {} allow-list", value, category);
        Ok(())
    }

    /// Whether `value` is accepted for `category`
    pub async fn exists(&self, category: Category, value: &str) -> InventoryResult<bool> {
        let mut session = self.store.session().await?;
        ensure_provisioned(&mut session).await?;
        if !is_storable(value) {
            return Ok(false);
        }

        let exists = session.value_exists(category, value).await?;
        debug!("Allow-list lookup {}='{}': {}", category, value, exists);
        Ok(exists)
    }
}
