// Copyright (c) 2025 - Cowboy AI, Inc.
//! PostgreSQL Store
//!
//! # Schema
//!
//! ```text
//! servers(hostname VARCHAR(255) PRIMARY KEY,
//!         environment, solution, system, os VARCHAR(255),
//!         tags VARCHAR(255)[])
//!
//! possible_environment(environment VARCHAR(255) PRIMARY KEY)
//! possible_solution(solution VARCHAR(255) PRIMARY KEY)
//! possible_system(system VARCHAR(255) PRIMARY KEY)
//! possible_os(os VARCHAR(255) PRIMARY KEY)
//! possible_tags(tags VARCHAR(255) PRIMARY KEY)
//! ```
//!
//! Table and column names interpolated into SQL come only from
//! [`Category`]; every user-supplied value is a bind parameter.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres};
use tracing::{debug, info};

use super::{InventoryStore, StoreSession};
use crate::config::DatabaseConfig;
use crate::domain::{Category, ServerRecord};
use crate::errors::{InventoryError, InventoryResult};

const CREATE_SERVERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS servers (
        hostname VARCHAR(255) PRIMARY KEY,
        environment VARCHAR(255),
        solution VARCHAR(255),
        system VARCHAR(255),
        os VARCHAR(255),
        tags VARCHAR(255) []
    )
"#;

/// Store backed by a PostgreSQL database
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect using the given configuration
    pub async fn connect(config: &DatabaseConfig) -> InventoryResult<Self> {
        info!(
            "Connecting to PostgreSQL at {}:{}/{}",
            config.host, config.port, config.name
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    type Session = PostgresSession;

    async fn session(&self) -> InventoryResult<PostgresSession> {
        let conn = self.pool.acquire().await?;
        Ok(PostgresSession { conn })
    }

    async fn ensure_schema(&self) -> InventoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_SERVERS_TABLE).execute(&mut *tx).await?;
        for category in Category::ALL {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {} ({} VARCHAR(255) PRIMARY KEY)",
                category.table_name(),
                category.as_str()
            );
            sqlx::query(&ddl).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        info!("Inventory schema ensured");
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct ServerRow {
    hostname: String,
    environment: Option<String>,
    solution: Option<String>,
    system: Option<String>,
    os: Option<String>,
    tags: Option<Vec<String>>,
}

impl From<ServerRow> for ServerRecord {
    fn from(row: ServerRow) -> Self {
        Self {
            hostname: row.hostname,
            environment: row.environment,
            solution: row.solution,
            system: row.system,
            os: row.os,
            tags: row.tags,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// A pooled connection held for one operation
///
/// Returned to the pool when dropped.
pub struct PostgresSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl StoreSession for PostgresSession {
    async fn ping(&mut self) -> InventoryResult<()> {
        sqlx::query("SELECT 1").execute(&mut *self.conn).await?;
        Ok(())
    }

    async fn missing_categories(&mut self) -> InventoryResult<Vec<Category>> {
        let tables: Vec<String> = Category::ALL
            .iter()
            .map(|c| c.table_name().to_string())
            .collect();

        let present: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT table_name::TEXT FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name::TEXT = ANY($1)
            "#,
        )
        .bind(&tables)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(Category::ALL
            .into_iter()
            .filter(|c| !present.iter().any(|t| t == c.table_name()))
            .collect())
    }

    async fn allowed_values(&mut self, category: Category) -> InventoryResult<Vec<String>> {
        let query = format!("SELECT {} FROM {}", category.as_str(), category.table_name());
        let values = sqlx::query_scalar(&query)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(values)
    }

    async fn value_exists(&mut self, category: Category, value: &str) -> InventoryResult<bool> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1)",
            category.table_name(),
            category.as_str()
        );
        let exists = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(exists)
    }

    async fn insert_value(&mut self, category: Category, value: &str) -> InventoryResult<()> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1)",
            category.table_name(),
            category.as_str()
        );
        sqlx::query(&query)
            .bind(value)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    InventoryError::AlreadyExists {
                        category,
                        value: value.to_string(),
                    }
                } else {
                    InventoryError::from(e)
                }
            })?;

        debug!("Inserted '{}' into {}", value, category.table_name());
        Ok(())
    }

    async fn list_servers(&mut self) -> InventoryResult<Vec<ServerRecord>> {
        let rows = sqlx::query_as::<_, ServerRow>(
            "SELECT hostname, environment, solution, system, os, tags FROM servers",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows.into_iter().map(ServerRecord::from).collect())
    }

    async fn find_server(&mut self, hostname: &str) -> InventoryResult<Option<ServerRecord>> {
        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            SELECT hostname, environment, solution, system, os, tags
            FROM servers WHERE hostname = $1
            "#,
        )
        .bind(hostname)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.map(ServerRecord::from))
    }

    async fn insert_server(&mut self, record: &ServerRecord) -> InventoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO servers (hostname, environment, solution, system, os, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.hostname)
        .bind(&record.environment)
        .bind(&record.solution)
        .bind(&record.system)
        .bind(&record.os)
        .bind(&record.tags)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InventoryError::Conflict(record.hostname.clone())
            } else {
                InventoryError::from(e)
            }
        })?;
        Ok(())
    }

    async fn update_server(&mut self, record: &ServerRecord) -> InventoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE servers
            SET environment = $1,
                solution = $2,
                system = $3,
                os = $4,
                tags = $5
            WHERE hostname = $6
            "#,
        )
        .bind(&record.environment)
        .bind(&record.solution)
        .bind(&record.system)
        .bind(&record.os)
        .bind(&record.tags)
        .bind(&record.hostname)
        .execute(&mut *self.conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_server(&mut self, hostname: &str) -> InventoryResult<bool> {
        let result = sqlx::query("DELETE FROM servers WHERE hostname = $1")
            .bind(hostname)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
