//! Refresh token repository trait defining the persistence contract of the rotator.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::StoreError;

/// Repository trait for RefreshRecord persistence operations
///
/// There is at most one record per account: the account ID is the primary key
/// and every write replaces the previous record for that account.
///
/// # Atomicity
/// Each write must be a single atomic statement. A cancelled or timed out call
/// must leave either the old record or the new one, never a partial mix.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert or replace the record keyed by `record.account_id`
    ///
    /// # Arguments
    /// * `record` - The record to persist, secret already in stored form
    ///
    /// # Returns
    /// * `Ok(())` - The record is now the only live one for its account
    /// * `Err(StoreError)` - Write failed
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use uuid::Uuid;
    /// # use auth_core::repositories::RefreshTokenRepository;
    /// # use auth_core::domain::entities::token::RefreshRecord;
    /// # async fn example(repo: &impl RefreshTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RefreshRecord::new(Uuid::new_v4(), "stored-secret".to_string(), Utc::now());
    /// repo.upsert_refresh_record(record).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn upsert_refresh_record(&self, record: RefreshRecord) -> Result<(), StoreError>;

    /// Find the record whose stored secret equals `secret` exactly
    ///
    /// # Returns
    /// * `Ok(Some(RefreshRecord))` - Record found
    /// * `Ok(None)` - No live record carries this secret
    /// * `Err(StoreError)` - Read failed
    async fn find_refresh_record_by_secret(
        &self,
        secret: &str,
    ) -> Result<Option<RefreshRecord>, StoreError>;

    /// Replace the record of `record.account_id` only if its stored secret is still `expected_secret`
    ///
    /// # Returns
    /// * `Ok(true)` - Replaced
    /// * `Ok(false)` - The record changed (or vanished) since it was read
    /// * `Err(StoreError)` - Write failed
    async fn replace_refresh_record_if_current(
        &self,
        expected_secret: &str,
        record: RefreshRecord,
    ) -> Result<bool, StoreError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
