// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup and manage PostgreSQL connection pool

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Open a bounded PostgreSQL connection pool
/// DOCUMENTATION: Single connection attempt, no retries; the startup
/// sequencer wraps this in its retry policy
pub async fn connect_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        // Maximum concurrent connections; excess acquirers queue
        .max_connections(config.db_max_connections)
        // Timeout waiting for a connection from the pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        // Keep-alive probe while a connection sits in the pool
        .test_before_acquire(true)
        .connect(&config.connection_string())
        .await
}
