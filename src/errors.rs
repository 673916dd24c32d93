// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory operations

use thiserror::Error;

use crate::domain::{Category, ValidationError};

/// Errors that can occur in registry and allow-list operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A server with this hostname already exists
    #[error("Server with the given hostname already exists: {0}")]
    Conflict(String),

    /// No server with this hostname exists
    #[error("Server with the given hostname does not exist: {0}")]
    NotFound(String),

    /// Request payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Allow-list value is already registered for its category
    #[error("Value '{value}' already exists for field '{category}'")]
    AlreadyExists { category: Category, value: String },

    /// Category name is not one of the recognized classifying fields
    #[error("Unknown field category '{0}'")]
    InvalidCategory(String),

    /// Allow-list table for a category has not been provisioned
    #[error("Table {} does not exist", .0.table_name())]
    CategoryNotProvisioned(Category),

    /// Backing store error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InventoryError {
    /// Whether this error is a server-side fault rather than a client error
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotProvisioned(_)
                | Self::Database(_)
                | Self::Serialization(_)
                | Self::Configuration(_)
        )
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        InventoryError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}
