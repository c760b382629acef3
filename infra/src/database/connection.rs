//! Database connection pool management
//!
//! Connection pooling using SQLx with MySQL, plus the bounded health ping
//! and schema bootstrap the server runs at startup.

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::str::FromStr;
use std::time::Duration;

use auth_shared::config::DatabaseConfig;

use crate::InfrastructureError;

use super::schema;

/// Database connection pool wrapper
///
/// Manages the MySQL connection pool with configurable settings
/// for connection limits, timeouts, and health checks.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
    /// Configuration used to create this pool
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings; `url` must be set
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Database pool or error
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("DATABASE_URL is not set".to_string()))?;

        let connect_options = MySqlConnectOptions::from_str(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        tracing::info!(
            "Creating database connection pool with max_connections: {}",
            config.max_connections
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self {
            pool,
            config: config.clone(),
        })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Deadline applied to each repository query
    pub fn query_timeout(&self) -> Duration {
        self.config.query_timeout()
    }

    /// Ping the database, giving up after the configured health-check timeout
    ///
    /// # Returns
    /// * `Ok(())` - The database answered `SELECT 1`
    /// * `Err(InfrastructureError::Timeout)` - No answer within the deadline
    /// * `Err(InfrastructureError::Database)` - The query failed
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        ping(&self.pool, self.config.health_check_timeout()).await
    }

    /// Create the tables the repositories need, if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Ensuring database schema");
        for statement in schema::ALL {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Close all connections in the pool
    ///
    /// This should be called during application shutdown.
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// `SELECT 1` bounded by `deadline`
pub(crate) async fn ping(pool: &MySqlPool, deadline: Duration) -> Result<(), InfrastructureError> {
    tracing::debug!("Performing database health check");

    match tokio::time::timeout(deadline, sqlx::query("SELECT 1").execute(pool)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            tracing::error!("Database health check failed: {}", e);
            Err(InfrastructureError::Database(e))
        }
        Err(_) => {
            tracing::error!("Database health check timed out after {:?}", deadline);
            Err(InfrastructureError::Timeout(deadline.as_millis() as u64))
        }
    }
}
