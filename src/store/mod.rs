// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Store Abstraction
//!
//! This module defines the storage interface used by the allow-list and
//! registry services, and its implementations.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → Service → InventoryStore::session() → StoreSession → Storage
//!                                                         (dropped at end of operation)
//! ```
//!
//! # Session Requirements
//!
//! 1. **Scoped**: one session per logical operation, released on drop
//! 2. **No caching**: every call re-queries storage
//! 3. **Store-enforced uniqueness**: duplicate keys surface as
//!    `Conflict` / `AlreadyExists`, never as a generic database error
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_inventory::config::DatabaseConfig;
//! use cim_inventory::store::{InventoryStore, PostgresStore, StoreSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresStore::connect(&DatabaseConfig::from_env()?).await?;
//!     store.ensure_schema().await?;
//!
//!     let mut session = store.session().await?;
//!     let servers = session.list_servers().await?;
//!     println!("{} servers", servers.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::{Category, ServerRecord};
use crate::errors::InventoryResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Backing store shared by all requests
///
/// Implementations hand out independent sessions; the store itself holds no
/// per-request state.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
    /// Session type produced by [`InventoryStore::session`]
    type Session: StoreSession;

    /// Acquire a session for one logical operation
    ///
    /// The session is released when dropped, on every exit path.
    async fn session(&self) -> InventoryResult<Self::Session>;

    /// Create the servers table and the allow-list tables if absent
    ///
    /// Idempotent. Run once at startup before serving requests.
    async fn ensure_schema(&self) -> InventoryResult<()>;
}

/// One scoped connection to the backing store
#[async_trait]
pub trait StoreSession: Send {
    /// Verify the store answers queries
    async fn ping(&mut self) -> InventoryResult<()>;

    /// Categories whose allow-list table is absent, in [`Category::ALL`] order
    async fn missing_categories(&mut self) -> InventoryResult<Vec<Category>>;

    /// Accepted values of a category, in storage order
    async fn allowed_values(&mut self, category: Category) -> InventoryResult<Vec<String>>;

    /// Whether `value` is accepted for `category`
    async fn value_exists(&mut self, category: Category, value: &str) -> InventoryResult<bool>;

    /// Register an accepted value
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the value is already registered for the category
    async fn insert_value(&mut self, category: Category, value: &str) -> InventoryResult<()>;

    /// All server records, in storage order
    async fn list_servers(&mut self) -> InventoryResult<Vec<ServerRecord>>;

    /// Point lookup by hostname
    async fn find_server(&mut self, hostname: &str) -> InventoryResult<Option<ServerRecord>>;

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// - `Conflict` if the hostname is taken, including by a concurrent insert
    async fn insert_server(&mut self, record: &ServerRecord) -> InventoryResult<()>;

    /// Overwrite every mutable field of an existing record
    ///
    /// Returns `false` when no record with that hostname exists.
    async fn update_server(&mut self, record: &ServerRecord) -> InventoryResult<bool>;

    /// Remove a record
    ///
    /// Returns whether a record was removed.
    async fn delete_server(&mut self, hostname: &str) -> InventoryResult<bool>;
}
