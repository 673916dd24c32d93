// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP handlers for servers and allow-list fields

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::routes::AppState;
use crate::domain::{invariants, AllowLists, Category, Payload, ServerRecord};
use crate::errors::InventoryError;
use crate::store::{InventoryStore, StoreSession};

/// Confirmation body for successful writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Response for health check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// `GET /api/servers`
pub async fn list_servers<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ServerRecord>>, InventoryError> {
    let servers = state.registry.list_all().await?;
    Ok(Json(servers))
}

/// `GET /api/servers/:hostname`
pub async fn get_server<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(hostname): Path<String>,
) -> Result<Json<ServerRecord>, InventoryError> {
    let server = state.registry.get_by_hostname(&hostname).await?;
    Ok(Json(server))
}

/// `POST /api/servers`
pub async fn create_server<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<MessageResponse>), InventoryError> {
    state.registry.create(&payload).await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Server created successfully"),
    ))
}

/// `PUT /api/servers/:hostname`
pub async fn update_server<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(hostname): Path<String>,
    Json(payload): Json<Payload>,
) -> Result<Json<MessageResponse>, InventoryError> {
    state.registry.update(&hostname, &payload).await?;
    Ok(MessageResponse::new("Server updated successfully"))
}

/// `DELETE /api/servers/:hostname`
pub async fn delete_server<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(hostname): Path<String>,
) -> Result<Json<MessageResponse>, InventoryError> {
    state.registry.delete(&hostname).await?;
    Ok(MessageResponse::new("Deleted server successfully"))
}

/// `GET /api/fields` and `GET /api/possible-fields`
pub async fn list_fields<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<AllowLists>, InventoryError> {
    let lists = state.allow_lists.list_categories().await?;
    Ok(Json(lists))
}

/// `POST /api/fields/:category`
///
/// The body carries the value under the category's own key,
/// e.g. `POST /api/fields/os` with `{"os": "debian-12"}`.
pub async fn add_field_value<S: InventoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(category): Path<String>,
    Json(payload): Json<Payload>,
) -> Result<(StatusCode, Json<MessageResponse>), InventoryError> {
    let category: Category = category.parse()?;
    let value = invariants::allowed_value(category, &payload)?;

    state.allow_lists.add_value(category, &value).await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new(format!("Created {} successfully", category.table_name())),
    ))
}

/// `GET /health`
///
/// Reports unavailable when a store session cannot be acquired or the store
/// does not answer.
pub async fn health<S: InventoryStore>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    let reachable = match state.store.session().await {
        Ok(mut session) => session.ping().await,
        Err(e) => Err(e),
    };

    let (status, label) = match reachable {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}
