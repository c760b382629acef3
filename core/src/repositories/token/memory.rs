//! In-memory implementation of RefreshTokenRepository
//!
//! Backs the server when no database is configured, and the test suites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::token::RefreshRecord;
use crate::errors::StoreError;

use super::r#trait::RefreshTokenRepository;

#[derive(Default)]
struct Faults {
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    delay_ms: AtomicU64,
}

/// Refresh records keyed by account ID; clones share the same storage
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    records: Arc<RwLock<HashMap<AccountId, RefreshRecord>>>,
    faults: Arc<Faults>,
}

impl InMemoryRefreshTokenRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record of an account
    pub async fn get(&self, account_id: AccountId) -> Option<RefreshRecord> {
        self.records.read().await.get(&account_id).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Rewrite the issuance time of an account's record
    pub async fn backdate(&self, account_id: AccountId, created_at: DateTime<Utc>) -> bool {
        match self.records.write().await.get_mut(&account_id) {
            Some(record) => {
                record.created_at = created_at;
                true
            }
            None => false,
        }
    }

    /// Make every subsequent read fail with `StoreError::Unavailable`
    pub fn fail_reads(&self, fail: bool) {
        self.faults.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with `StoreError::Unavailable`
    pub fn fail_writes(&self, fail: bool) {
        self.faults.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stall every call for `delay` before touching storage
    pub fn set_delay(&self, delay: Duration) {
        self.faults
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    async fn before_read(&self) -> Result<(), StoreError> {
        self.stall().await;
        if self.faults.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "injected read failure".to_string(),
            });
        }
        Ok(())
    }

    async fn before_write(&self) -> Result<(), StoreError> {
        self.stall().await;
        if self.faults.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "injected write failure".to_string(),
            });
        }
        Ok(())
    }

    async fn stall(&self) {
        let delay = self.faults.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn upsert_refresh_record(&self, record: RefreshRecord) -> Result<(), StoreError> {
        self.before_write().await?;
        self.records.write().await.insert(record.account_id, record);
        Ok(())
    }

    async fn find_refresh_record_by_secret(
        &self,
        secret: &str,
    ) -> Result<Option<RefreshRecord>, StoreError> {
        self.before_read().await?;
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.secret == secret).cloned())
    }

    async fn replace_refresh_record_if_current(
        &self,
        expected_secret: &str,
        record: RefreshRecord,
    ) -> Result<bool, StoreError> {
        self.before_write().await?;
        let mut records = self.records.write().await;
        match records.get_mut(&record.account_id) {
            Some(current) if current.secret == expected_secret => {
                *current = record;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.before_read().await
    }
}
