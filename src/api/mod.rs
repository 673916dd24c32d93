// Copyright (c) 2025 - Cowboy AI, Inc.
//! REST surface of the inventory
//!
//! Handlers are thin: they extract path and JSON body, call the service
//! layer, and map [`crate::errors::InventoryError`] to a status code and a
//! `{"message": ...}` body.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ErrorResponse;
pub use handlers::{HealthResponse, MessageResponse};
pub use routes::{create_router, AppState};
