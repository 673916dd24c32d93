// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Inventory Management
//!
//! Application services sitting between the HTTP surface and the store.
//!
//! # Architecture
//!
//! ```text
//! Client Request
//!     ↓
//! HTTP handler (api)
//!     ↓
//! Service Layer (this module)
//!     ├── AllowListService  (list / add / exists per category)
//!     └── InventoryRegistry (CRUD on server records, validated against the allow-lists)
//!     ↓
//! StoreSession (one per operation)
//!     ↓
//! PostgreSQL
//! ```
//!
//! # Design Principles
//!
//! 1. **Operation Boundaries**: each service method owns exactly one store session
//! 2. **Fail Fast**: validation errors return before any write
//! 3. **Store Arbitrates**: uniqueness comes from primary keys, not pre-checks
//! 4. **No Caching**: allow-lists are re-read on every validation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cim_inventory::domain::Category;
//! use cim_inventory::service::{AllowListService, InventoryRegistry};
//! use cim_inventory::store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::provisioned().await);
//! let allow_lists = AllowListService::new(store.clone());
//! let registry = InventoryRegistry::new(store);
//!
//! allow_lists.add_value(Category::Environment, "prod").await?;
//! let payload = serde_json::json!({"hostname": "web-1", "environment": "prod"});
//! registry.create(payload.as_object().unwrap()).await?;
//! ```

pub mod allow_list;
pub mod registry;

pub use allow_list::AllowListService;
pub use registry::InventoryRegistry;
