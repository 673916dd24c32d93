// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP API router

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::service::{AllowListService, InventoryRegistry};
use crate::store::InventoryStore;

/// Shared state handed to every handler
pub struct AppState<S> {
    pub registry: InventoryRegistry<S>,
    pub allow_lists: AllowListService<S>,
    pub store: Arc<S>,
}

impl<S: InventoryStore> AppState<S> {
    /// Build both services over one shared store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            registry: InventoryRegistry::new(Arc::clone(&store)),
            allow_lists: AllowListService::new(Arc::clone(&store)),
            store,
        }
    }
}

/// Create the API router with all endpoints.
///
/// # Routes
///
/// ## Servers
/// - `GET /api/servers` - List all servers
/// - `POST /api/servers` - Register a server
/// - `GET /api/servers/:hostname` - Get one server
/// - `PUT /api/servers/:hostname` - Replace a server's fields
/// - `DELETE /api/servers/:hostname` - Remove a server
///
/// ## Allow-lists
/// - `GET /api/fields` (alias `/api/possible-fields`) - Accepted values per category
/// - `POST /api/fields/:category` - Accept a new value
///
/// ## Health
/// - `GET /health` - Store reachability
pub fn create_router<S: InventoryStore>(state: AppState<S>) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health::<S>))
        .route(
            "/api/servers",
            get(handlers::list_servers::<S>).post(handlers::create_server::<S>),
        )
        .route(
            "/api/servers/:hostname",
            get(handlers::get_server::<S>)
                .put(handlers::update_server::<S>)
                .delete(handlers::delete_server::<S>),
        )
        .route("/api/fields", get(handlers::list_fields::<S>))
        .route("/api/possible-fields", get(handlers::list_fields::<S>))
        .route("/api/fields/:category", post(handlers::add_field_value::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
