// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service configuration loaded from the environment

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

use crate::errors::{InventoryError, InventoryResult};

/// Configuration for the PostgreSQL connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host (`DB_HOST`)
    pub host: String,

    /// Database port (`DB_PORT`)
    pub port: u16,

    /// Database name (`DB_NAME`)
    pub name: String,

    /// User name (`DB_USER`)
    pub user: String,

    /// Password (`DB_PASSWORD`)
    #[serde(skip_serializing)]
    pub password: String,

    /// Upper bound on simultaneously open connections (`DB_MAX_CONNECTIONS`)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long an operation waits for a connection (`DB_ACQUIRE_TIMEOUT_SECS`)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl DatabaseConfig {
    /// Load from the process environment
    ///
    /// Fails if any of `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` or
    /// `DB_PASSWORD` is unset.
    pub fn from_env() -> InventoryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> InventoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                InventoryError::Configuration(format!("{} environment variable not set", key))
            })
        };

        let port = required("DB_PORT")?;
        let port = port.parse::<u16>().map_err(|e| {
            InventoryError::Configuration(format!("DB_PORT '{}' is not a valid port: {}", port, e))
        })?;

        Ok(Self {
            host: required("DB_HOST")?,
            port,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            max_connections: parse_optional(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or_else(default_max_connections),
            acquire_timeout_secs: parse_optional(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")?
                .unwrap_or_else(default_acquire_timeout_secs),
        })
    }

    /// Connection options for sqlx
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
            .application_name("cim-inventory")
    }

    /// Connection acquisition timeout
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Configuration for the HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (`INVENTORY_BIND_ADDR`)
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("INVENTORY_BIND_ADDR")
            .map(|bind_addr| Self { bind_addr })
            .unwrap_or_default()
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str) -> InventoryResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                InventoryError::Configuration(format!("{} '{}' is invalid: {}", key, raw, e))
            })
        })
        .transpose()
}
