//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! One row per account in `refresh_tokens`. Every write is a single statement,
//! so a cancelled request never leaves a half-applied rotation behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use uuid::Uuid;

use auth_core::domain::entities::token::RefreshRecord;
use auth_core::errors::StoreError;
use auth_core::repositories::RefreshTokenRepository;

use super::bounded;
use crate::database::connection::ping;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
    /// Deadline for each query
    query_timeout: Duration,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    /// * `query_timeout` - Deadline applied to every statement
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Convert database row to RefreshRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshRecord, StoreError> {
        let corrupt = |e: sqlx::Error| StoreError::Corrupt {
            message: format!("refresh_tokens row: {}", e),
        };

        let account_id: String = row.try_get("account_id").map_err(corrupt)?;

        Ok(RefreshRecord {
            account_id: Uuid::parse_str(&account_id).map_err(|e| StoreError::Corrupt {
                message: format!("Invalid account UUID: {}", e),
            })?,
            secret: row.try_get("secret").map_err(corrupt)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(corrupt)?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn upsert_refresh_record(&self, record: RefreshRecord) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO refresh_tokens (account_id, secret, created_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                secret = VALUES(secret),
                created_at = VALUES(created_at)
        "#;

        bounded(
            self.query_timeout,
            "Failed to upsert refresh token",
            sqlx::query(query)
                .bind(record.account_id.to_string())
                .bind(&record.secret)
                .bind(record.created_at)
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_refresh_record_by_secret(
        &self,
        secret: &str,
    ) -> Result<Option<RefreshRecord>, StoreError> {
        let query = r#"
            SELECT account_id, secret, created_at
            FROM refresh_tokens
            WHERE secret = ?
            LIMIT 1
        "#;

        let row = bounded(
            self.query_timeout,
            "Failed to find refresh token",
            sqlx::query(query).bind(secret).fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn replace_refresh_record_if_current(
        &self,
        expected_secret: &str,
        record: RefreshRecord,
    ) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE refresh_tokens
            SET secret = ?, created_at = ?
            WHERE account_id = ? AND secret = ?
        "#;

        let result = bounded(
            self.query_timeout,
            "Failed to replace refresh token",
            sqlx::query(query)
                .bind(&record.secret)
                .bind(record.created_at)
                .bind(record.account_id.to_string())
                .bind(expected_secret)
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        ping(&self.pool, self.query_timeout).await.map_err(Into::into)
    }
}
