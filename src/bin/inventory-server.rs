// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Server
//!
//! Serves the server inventory REST API backed by PostgreSQL.
//!
//! Run with: cargo run --bin inventory-server
//!
//! Prerequisites:
//! 1. PostgreSQL reachable with DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASSWORD set
//! 2. Optional INVENTORY_BIND_ADDR (default 0.0.0.0:8000)

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use cim_inventory::{
    create_router, AppState, DatabaseConfig, InventoryStore, PostgresStore, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("🚀 Starting Inventory Server");

    // Load configuration
    let database = DatabaseConfig::from_env().context("Database configuration incomplete")?;
    let server = ServerConfig::from_env();
    info!("📋 Configuration loaded:");
    info!("  - Database: {}:{}/{}", database.host, database.port, database.name);
    info!("  - Bind address: {}", server.bind_addr);

    // Connect and provision tables before accepting requests
    let store = PostgresStore::connect(&database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    info!("✅ Connected to PostgreSQL");

    store
        .ensure_schema()
        .await
        .context("Failed to provision inventory tables")?;
    info!("✅ Schema ready");

    let app = create_router(AppState::new(Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(&server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", server.bind_addr))?;
    info!("🎯 Listening on {}", server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Inventory Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
