// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-process store
//!
//! Keeps the same observable contract as the PostgreSQL store: insertion
//! order is storage order, keys are unique, and allow-list tables only exist
//! after [`InventoryStore::ensure_schema`]. Used by tests and local runs.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::{InventoryStore, StoreSession};
use crate::domain::{AllowLists, Category, ServerRecord};
use crate::errors::{InventoryError, InventoryResult};

#[derive(Debug, Default)]
struct MemoryState {
    provisioned: BTreeSet<Category>,
    allow_lists: AllowLists,
    servers: Vec<ServerRecord>,
}

impl MemoryState {
    fn require(&self, category: Category) -> InventoryResult<()> {
        if self.provisioned.contains(&category) {
            Ok(())
        } else {
            Err(InventoryError::Database(format!(
                "relation \"{}\" does not exist",
                category.table_name()
            )))
        }
    }
}

/// Store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store with no tables provisioned
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every table provisioned
    pub async fn provisioned() -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().await;
            state.provisioned.extend(Category::ALL);
        }
        store
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    type Session = MemorySession;

    async fn session(&self) -> InventoryResult<MemorySession> {
        Ok(MemorySession {
            state: Arc::clone(&self.state),
        })
    }

    async fn ensure_schema(&self) -> InventoryResult<()> {
        let mut state = self.state.lock().await;
        state.provisioned.extend(Category::ALL);
        debug!("Memory store schema ensured");
        Ok(())
    }
}

/// Session over a [`MemoryStore`]
///
/// Each call locks the shared state for its own duration only.
#[derive(Debug)]
pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn ping(&mut self) -> InventoryResult<()> {
        Ok(())
    }

    async fn missing_categories(&mut self) -> InventoryResult<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(Category::ALL
            .into_iter()
            .filter(|category| !state.provisioned.contains(category))
            .collect())
    }

    async fn allowed_values(&mut self, category: Category) -> InventoryResult<Vec<String>> {
        let state = self.state.lock().await;
        state.require(category)?;
        Ok(state.allow_lists.values(category).to_vec())
    }

    async fn value_exists(&mut self, category: Category, value: &str) -> InventoryResult<bool> {
        let state = self.state.lock().await;
        state.require(category)?;
        Ok(state.allow_lists.values(category).iter().any(|v| v == value))
    }

    async fn insert_value(&mut self, category: Category, value: &str) -> InventoryResult<()> {
        let mut state = self.state.lock().await;
        state.require(category)?;

        let mut values = state.allow_lists.values(category).to_vec();
        if values.iter().any(|v| v == value) {
            return Err(InventoryError::AlreadyExists {
                category,
                value: value.to_string(),
            });
        }
        values.push(value.to_string());
        state.allow_lists.set_values(category, values);
        Ok(())
    }

    async fn list_servers(&mut self) -> InventoryResult<Vec<ServerRecord>> {
        let state = self.state.lock().await;
        Ok(state.servers.clone())
    }

    async fn find_server(&mut self, hostname: &str) -> InventoryResult<Option<ServerRecord>> {
        let state = self.state.lock().await;
        Ok(state.servers.iter().find(|s| s.hostname == hostname).cloned())
    }

    async fn insert_server(&mut self, record: &ServerRecord) -> InventoryResult<()> {
        let mut state = self.state.lock().await;
        if state.servers.iter().any(|s| s.hostname == record.hostname) {
            return Err(InventoryError::Conflict(record.hostname.clone()));
        }
        state.servers.push(record.clone());
        Ok(())
    }

    async fn update_server(&mut self, record: &ServerRecord) -> InventoryResult<bool> {
        let mut state = self.state.lock().await;
        match state.servers.iter_mut().find(|s| s.hostname == record.hostname) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_server(&mut self, hostname: &str) -> InventoryResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.servers.len();
        state.servers.retain(|s| s.hostname != hostname);
        Ok(state.servers.len() != before)
    }
}
