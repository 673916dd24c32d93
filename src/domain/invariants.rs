// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Request Shape Invariants
//!
//! Request bodies arrive as untyped JSON objects. The functions here check
//! the structural rules that need no store access (presence, emptiness and
//! JSON type) and hand back typed values. Allow-list membership is checked
//! afterwards by the registry, one field at a time, so the first offending
//! field in [`Category::ALL`] order is the one reported.
//!
//! All functions are pure: no I/O, no mutation, deterministic.

use serde_json::{Map, Value};

use super::{Category, Hostname, HostnameError};

/// JSON object received as a request body
pub type Payload = Map<String, Value>;

/// Validation result with detailed error information
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Client-side validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Create request without a hostname
    #[error("Field 'hostname' is required")]
    MissingHostname,

    /// Hostname present but unusable as a key
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] HostnameError),

    /// Field present with a non-string JSON value
    #[error("Field '{field}' must be a string")]
    NotAString { field: String },

    /// Classifying field present but empty or null
    #[error("Field '{category}' cannot be empty. At least you need to assign the value 'unknown'.")]
    EmptyValue { category: Category },

    /// Classifying field value is not in its allow-list
    #[error("Invalid value '{value}' for field '{category}'")]
    InvalidValue { category: Category, value: String },

    /// Tags present but not a JSON array
    #[error("Field 'tags' must be an array")]
    TagsNotArray,

    /// Tag element empty or null
    #[error("Tags cannot be empty. At least you need to assign the value 'unknown'.")]
    EmptyTag,

    /// Tag not in the tags allow-list
    #[error("Invalid tag '{0}'")]
    InvalidTag(String),

    /// Allow-list addition without a usable value
    #[error("Field '{category}' is required and cannot be empty")]
    MissingAllowedValue { category: Category },

    /// Allow-list addition containing a NUL character
    #[error("Field '{category}' cannot contain NUL characters")]
    UnstorableValue { category: Category },
}

/// Whether the store can hold `value` at all
///
/// PostgreSQL text columns reject NUL, so such a value can never be on an
/// allow-list nor be a key.
pub fn is_storable(value: &str) -> bool {
    !value.contains('\0')
}

/// Extract the hostname of a create request
///
/// # Rules
/// - Must be present and not null
/// - Must be a string
/// - Must satisfy the [`Hostname`] invariants
pub fn hostname(payload: &Payload) -> ValidationResult<Hostname> {
    match payload.get("hostname") {
        None | Some(Value::Null) => Err(ValidationError::MissingHostname),
        Some(Value::String(raw)) => Ok(Hostname::new(raw.as_str())?),
        Some(_) => Err(ValidationError::NotAString {
            field: "hostname".to_string(),
        }),
    }
}

/// Structural check of a single-valued classifying field
///
/// # Returns
/// - `Ok(None)` when the field is absent
/// - `Ok(Some(value))` for a non-empty string
///
/// # Rules
/// - `null` and `""` are empty
/// - A string containing NUL is never an accepted value
/// - Any other non-string is rejected
pub fn classifying_value(
    category: Category,
    value: Option<&Value>,
) -> ValidationResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(Value::Null) => Err(ValidationError::EmptyValue { category }),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::EmptyValue { category }),
        Some(Value::String(s)) if !is_storable(s) => Err(ValidationError::InvalidValue {
            category,
            value: s.clone(),
        }),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::NotAString {
            field: category.as_str().to_string(),
        }),
    }
}

/// Structural check of the tags field
///
/// Returns the raw elements so each can be checked and looked up in order.
pub fn tag_elements(value: Option<&Value>) -> ValidationResult<Option<&[Value]>> {
    match value {
        None => Ok(None),
        Some(Value::Array(elements)) => Ok(Some(elements.as_slice())),
        Some(_) => Err(ValidationError::TagsNotArray),
    }
}

/// Structural check of one tag element
///
/// # Rules
/// - `null` and `""` are empty
/// - A string containing NUL or any non-string can never match the allow-list
pub fn tag_value(value: &Value) -> ValidationResult<String> {
    match value {
        Value::Null => Err(ValidationError::EmptyTag),
        Value::String(s) if s.is_empty() => Err(ValidationError::EmptyTag),
        Value::String(s) if !is_storable(s) => Err(ValidationError::InvalidTag(s.clone())),
        Value::String(s) => Ok(s.clone()),
        other => Err(ValidationError::InvalidTag(other.to_string())),
    }
}

/// Extract the value of an allow-list addition
///
/// The body carries the value under the category's own key,
/// e.g. `{"os": "debian-12"}`.
pub fn allowed_value(category: Category, payload: &Payload) -> ValidationResult<String> {
    match payload.get(category.as_str()) {
        None | Some(Value::Null) => Err(ValidationError::MissingAllowedValue { category }),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ValidationError::MissingAllowedValue { category })
        }
        Some(Value::String(s)) if !is_storable(s) => {
            Err(ValidationError::UnstorableValue { category })
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::NotAString {
            field: category.as_str().to_string(),
        }),
    }
}
