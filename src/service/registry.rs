// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Registry Service
//!
//! Persists server records after validating every classifying field and tag
//! against the allow-lists.
//!
//! # Write Pipeline
//!
//! ```text
//! payload → hostname check → existence check (Conflict / NotFound)
//!         → allow-list tables provisioned?        (server fault)
//!         → environment, solution, system, os     (empty? accepted?)
//!         → tags                                  (array? each empty? accepted?)
//!         → INSERT / UPDATE                       (store uniqueness → Conflict)
//! ```
//!
//! Every step runs on one store session acquired at the start of the
//! operation. Validation failures return before any mutation and the session
//! is released by drop on that early return as on any other.
//!
//! # Update Semantics
//!
//! Updates are full overwrites: a field absent from the payload is cleared,
//! not left unchanged.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::allow_list::ensure_provisioned;
use crate::domain::invariants;
use crate::domain::{Category, Hostname, Payload, ServerFields, ServerRecord, ValidationError};
use crate::errors::{InventoryError, InventoryResult};
use crate::store::{InventoryStore, StoreSession};

/// Validate a payload's classifying fields and tags against the allow-lists
///
/// Fields are checked in [`Category::ALL`] order and the first failure is
/// returned. Keys other than the five categories are ignored.
async fn validate_fields<T: StoreSession>(
    session: &mut T,
    payload: &Payload,
) -> InventoryResult<ServerFields> {
    ensure_provisioned(session).await?;

    let mut fields = ServerFields::default();

    for category in Category::CLASSIFYING {
        let value = invariants::classifying_value(category, payload.get(category.as_str()))?;
        if let Some(value) = value {
            if !session.value_exists(category, &value).await? {
                return Err(ValidationError::InvalidValue { category, value }.into());
            }
            fields.set_classifying(category, Some(value));
        }
    }

    if let Some(elements) = invariants::tag_elements(payload.get(Category::Tags.as_str()))? {
        let mut tags = Vec::with_capacity(elements.len());
        for element in elements {
            let tag = invariants::tag_value(element)?;
            if !session.value_exists(Category::Tags, &tag).await? {
                return Err(ValidationError::InvalidTag(tag).into());
            }
            tags.push(tag);
        }
        fields.tags = Some(tags);
    }

    Ok(fields)
}

/// Server record operations over an [`InventoryStore`]
pub struct InventoryRegistry<S> {
    store: Arc<S>,
}

impl<S> Clone for InventoryRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: InventoryStore> InventoryRegistry<S> {
    /// Create a registry over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every record, in storage order
    pub async fn list_all(&self) -> InventoryResult<Vec<ServerRecord>> {
        let mut session = self.store.session().await?;
        session.list_servers().await
    }

    /// Point lookup by hostname
    ///
    /// A string that cannot be a hostname matches nothing.
    pub async fn get_by_hostname(&self, hostname: &str) -> InventoryResult<ServerRecord> {
        if Hostname::new(hostname).is_err() {
            return Err(InventoryError::NotFound(hostname.to_string()));
        }

        let mut session = self.store.session().await?;
        session
            .find_server(hostname)
            .await?
            .ok_or_else(|| InventoryError::NotFound(hostname.to_string()))
    }

    /// Register a new server
    ///
    /// # Errors
    ///
    /// - `Validation` for a missing/invalid hostname or a field rejected by
    ///   the allow-lists
    /// - `Conflict` if the hostname is already registered, including when a
    ///   concurrent create wins the race after the existence check
    /// - `CategoryNotProvisioned` if an allow-list table is missing
    pub async fn create(&self, payload: &Payload) -> InventoryResult<ServerRecord> {
        let hostname = invariants::hostname(payload)?;

        let mut session = self.store.session().await?;

        if session.find_server(hostname.as_str()).await?.is_some() {
            debug!("Create rejected, {} already registered", hostname);
            return Err(InventoryError::Conflict(hostname.into_inner()));
        }

        let fields = validate_fields(&mut session, payload)
            .await
            .inspect_err(|e| warn!("Create of {} rejected: {}", hostname, e))?;

        let record = ServerRecord::new(hostname.into_inner(), fields);
        session.insert_server(&record).await?;

        info!("Registered server {}", record.hostname);
        Ok(record)
    }

    /// Replace every mutable field of an existing server
    ///
    /// A `hostname` key in the payload is ignored; the key cannot change.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server has this hostname, including when it is
    ///   deleted concurrently before the write
    /// - `Validation` for a field rejected by the allow-lists
    /// - `CategoryNotProvisioned` if an allow-list table is missing
    pub async fn update(&self, hostname: &str, payload: &Payload) -> InventoryResult<ServerRecord> {
        if Hostname::new(hostname).is_err() {
            return Err(InventoryError::NotFound(hostname.to_string()));
        }

        let mut session = self.store.session().await?;

        if session.find_server(hostname).await?.is_none() {
            return Err(InventoryError::NotFound(hostname.to_string()));
        }

        let fields = validate_fields(&mut session, payload)
            .await
            .inspect_err(|e| warn!("Update of {} rejected: {}", hostname, e))?;

        let record = ServerRecord::new(hostname, fields);
        if !session.update_server(&record).await? {
            return Err(InventoryError::NotFound(hostname.to_string()));
        }

        info!("Updated server {}", hostname);
        Ok(record)
    }

    /// Remove a server
    ///
    /// Succeeds whether or not the server existed.
    pub async fn delete(&self, hostname: &str) -> InventoryResult<()> {
        if Hostname::new(hostname).is_err() {
            debug!("Delete of invalid hostname {:?} ignored", hostname);
            return Ok(());
        }

        let mut session = self.store.session().await?;

        if session.delete_server(hostname).await? {
            info!("Deleted server {}", hostname);
        } else {
            debug!("Delete of unknown server {} ignored", hostname);
        }
        Ok(())
    }
}
