// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hostname validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("Hostname is empty")]
    Empty,

    #[error("Hostname exceeds maximum length of 255 characters: {0}")]
    TooLong(usize),

    #[error("Invalid character in hostname: {0:?}")]
    InvalidCharacter(char),
}

/// Primary key of a server record
///
/// Hostnames are stored as given; no DNS normalization is applied, so
/// `WEB01` and `web01` are distinct records. The invariants only guard what
/// the `servers.hostname` column can hold:
/// - Non-empty
/// - At most 255 characters
/// - No control characters
///
/// # Examples
///
/// ```rust
/// use cim_inventory::domain::Hostname;
///
/// let host = Hostname::new("web-1").unwrap();
/// assert_eq!(host.as_str(), "web-1");
///
/// assert!(Hostname::new("").is_err());
/// assert!(Hostname::new("bad\nname").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Width of the `servers.hostname` column
    pub const MAX_LENGTH: usize = 255;

    /// Create a new hostname with validation
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let hostname = hostname.into();

        if hostname.is_empty() {
            return Err(HostnameError::Empty);
        }

        let length = hostname.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(HostnameError::TooLong(length));
        }

        if let Some(ch) = hostname.chars().find(|c| c.is_control()) {
            return Err(HostnameError::InvalidCharacter(ch));
        }

        Ok(Self(hostname))
    }

    /// Get the hostname as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Hostname {
    type Error = HostnameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hostnames() {
        assert!(Hostname::new("web-1").is_ok());
        assert!(Hostname::new("db01.prod.example.com").is_ok());
        assert!(Hostname::new("a").is_ok());
        // Not DNS-restricted
        assert!(Hostname::new("legacy_host").is_ok());
    }

    #[test]
    fn test_invalid_hostnames() {
        assert_eq!(Hostname::new(""), Err(HostnameError::Empty));
        assert_eq!(
            Hostname::new("tab\there"),
            Err(HostnameError::InvalidCharacter('\t'))
        );
    }

    #[test]
    fn test_length_limit() {
        assert!(Hostname::new("a".repeat(255)).is_ok());
        assert_eq!(
            Hostname::new("a".repeat(256)),
            Err(HostnameError::TooLong(256))
        );
    }

    #[test]
    fn test_case_preserved() {
        let host = Hostname::new("WEB01").unwrap();
        assert_eq!(host.to_string(), "WEB01");
    }

    #[test]
    fn test_serde_validates() {
        let host: Hostname = serde_json::from_str("\"web-1\"").unwrap();
        assert_eq!(host.as_str(), "web-1");
        assert!(serde_json::from_str::<Hostname>("\"\"").is_err());
    }
}
