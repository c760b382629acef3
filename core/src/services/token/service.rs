//! Refresh token lifecycle: issuance and rotation

use std::future::Future;
use std::sync::Arc;

use auth_shared::config::RotationMode;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::token::{RefreshRecord, TokenPair};
use crate::errors::{StoreError, TokenError};
use crate::repositories::RefreshTokenRepository;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::issuer::{AccessTokenVerifier, TokenIssuer};

/// Issues token pairs and rotates refresh tokens against a refresh store
pub struct TokenService<R: RefreshTokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    issuer: TokenIssuer,
    clock: Arc<dyn Clock>,
}

impl<R: RefreshTokenRepository> TokenService<R> {
    /// Creates a new token service reading time from the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh store
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit time source
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh store
    /// * `config` - Token service configuration
    /// * `clock` - Source of "now" for minting, verification and the age gate
    pub fn with_clock(repository: R, config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let issuer = TokenIssuer::new(&config, clock.clone());
        Self {
            repository,
            config,
            issuer,
            clock,
        }
    }

    /// The stateless half of the service
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Issues a fresh token pair for an account, superseding any earlier refresh token
    ///
    /// # Arguments
    ///
    /// * `account_id` - Subject of the new pair
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The access token and the plain refresh secret
    /// * `Err(TokenError::IssuanceFailure)` - Minting or persistence failed; nothing usable was returned
    pub async fn issue(&self, account_id: AccountId) -> Result<TokenPair, TokenError> {
        match self.issue_inner(account_id).await {
            Ok(pair) => {
                tracing::info!(account_id = %account_id, "Issued token pair");
                Ok(pair)
            }
            Err(e) => {
                tracing::error!(
                    account_id = %account_id,
                    kind = e.kind(),
                    error = %e,
                    "Token issuance failed"
                );
                Err(TokenError::issuance(account_id, e))
            }
        }
    }

    async fn issue_inner(&self, account_id: AccountId) -> Result<TokenPair, TokenError> {
        let access_token = self.issuer.mint_access_token(account_id)?;
        let refresh_token = self.issuer.mint_refresh_token()?;

        let record = RefreshRecord::new(
            account_id,
            self.config.secret_storage.stored_form(&refresh_token),
            self.clock.now(),
        );
        self.with_deadline(self.repository.upsert_refresh_record(record))
            .await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.issuer.access_token_ttl_secs(),
        ))
    }

    /// Exchanges a refresh secret for a fresh pair
    ///
    /// Checks run in a fixed order: existence, then age, then a constant-time
    /// match. The presented secret stops working once the new record is written.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The new pair
    /// * `Err(TokenError::UnknownToken)` - No record holds this secret
    /// * `Err(TokenError::ExpiredToken)` - The record is older than the max age
    /// * `Err(TokenError::TokenMismatch)` - The match re-check disagreed with the lookup
    /// * `Err(TokenError::RotationConflict)` - Another rotation replaced the record first
    /// * `Err(TokenError::StoreFailure)` - The store failed or timed out
    pub async fn rotate(&self, presented: &str) -> Result<TokenPair, TokenError> {
        let result = self.rotate_inner(presented).await;
        match &result {
            Ok(_) => {}
            Err(e) if e.is_caller_fault() => {
                tracing::warn!(kind = e.kind(), reason = %e, "Refresh token rejected");
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Refresh token rotation failed");
            }
        }
        result
    }

    async fn rotate_inner(&self, presented: &str) -> Result<TokenPair, TokenError> {
        if presented.is_empty() {
            return Err(TokenError::UnknownToken);
        }

        let storage = self.config.secret_storage;
        let record = self
            .with_deadline(
                self.repository
                    .find_refresh_record_by_secret(&storage.stored_form(presented)),
            )
            .await?
            .ok_or(TokenError::UnknownToken)?;

        let now = self.clock.now();
        if record.is_expired_at(now, self.config.refresh_token_max_age) {
            return Err(TokenError::ExpiredToken {
                account_id: record.account_id,
                age_secs: record.age_at(now).num_seconds(),
            });
        }

        if !storage.matches(&record.secret, presented) {
            return Err(TokenError::TokenMismatch {
                account_id: record.account_id,
            });
        }

        let account_id = record.account_id;
        let access_token = self.issuer.mint_access_token(account_id)?;
        let refresh_token = self.issuer.mint_refresh_token()?;
        let replacement = RefreshRecord::new(account_id, storage.stored_form(&refresh_token), now);

        match self.config.rotation_mode {
            RotationMode::LastWriteWins => {
                self.with_deadline(self.repository.upsert_refresh_record(replacement))
                    .await?;
            }
            RotationMode::CompareAndSwap => {
                let replaced = self
                    .with_deadline(
                        self.repository
                            .replace_refresh_record_if_current(&record.secret, replacement),
                    )
                    .await?;
                if !replaced {
                    return Err(TokenError::RotationConflict { account_id });
                }
            }
        }

        tracing::info!(account_id = %account_id, "Rotated refresh token");
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.issuer.access_token_ttl_secs(),
        ))
    }

    /// Verifies an access token; see [`TokenIssuer::verify_access_token`]
    pub fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError> {
        self.issuer.verify_access_token(token)
    }

    /// Refresh store reachability, bounded by the store timeout
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.with_deadline(self.repository.health_check()).await
    }

    async fn with_deadline<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let deadline = self.config.store_timeout;
        match tokio::time::timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                elapsed_ms: deadline.as_millis() as u64,
            }),
        }
    }
}

impl<R: RefreshTokenRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError> {
        self.issuer.verify_access_token(token)
    }
}
