// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server inventory registry for the Composable Information Machine
//!
//! Stores records describing machines (hostname, environment, solution,
//! system, operating system, tags) in PostgreSQL and exposes them over a small
//! REST interface. Every write is validated against operator-maintained
//! allow-lists before it is persisted.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use api::{create_router, AppState};
pub use config::{DatabaseConfig, ServerConfig};
pub use domain::{AllowLists, Category, ServerFields, ServerRecord};
pub use errors::{InventoryError, InventoryResult};
pub use service::{AllowListService, InventoryRegistry};
pub use store::{InventoryStore, MemoryStore, PostgresStore, StoreSession};
