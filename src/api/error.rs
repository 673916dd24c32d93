// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP mapping of inventory errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::InventoryError;

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    /// Underlying store error text, present for server faults only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InventoryError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) | Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::NotFound(_) | Self::InvalidCategory(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CategoryNotProvisioned(_)
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if self.is_server_fault() {
            error!("Request failed: {}", self);
            let message = match &self {
                Self::CategoryNotProvisioned(_) => self.to_string(),
                _ => "Internal server error".to_string(),
            };
            ErrorResponse {
                message,
                error: Some(self.to_string()),
            }
        } else {
            ErrorResponse {
                message: self.to_string(),
                error: None,
            }
        };

        (status, Json(body)).into_response()
    }
}
