//! Token entities for JWT access tokens and rotating refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

use super::account::AccountId;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token maximum age (7 days)
pub const REFRESH_TOKEN_MAX_AGE_DAYS: i64 = 7;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// JWT ID, unique per minted token
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The subject of the token
    /// * `issued_at` - Minting instant
    /// * `ttl` - Lifetime of the token
    ///
    /// Fails with `TokenError::Signing` when `issued_at + ttl` is not a representable instant.
    pub fn new_access_token(
        account_id: AccountId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing {
                reason: format!("access token lifetime of {}s is out of range", ttl.num_seconds()),
            })?;

        Ok(Self {
            sub: account_id.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Expired once `now` is strictly past `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Parses the subject as an account ID
    pub fn account_id(&self) -> Result<AccountId, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// The single live refresh token of an account
///
/// Keyed by `account_id`: writing a new record for the same account replaces
/// the previous one, which makes the previous secret unusable immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Account this token belongs to (primary key)
    pub account_id: AccountId,

    /// Secret in its stored form (plain or digest, depending on storage policy)
    pub secret: String,

    /// Timestamp when the secret was issued
    pub created_at: DateTime<Utc>,
}

impl RefreshRecord {
    pub fn new(account_id: AccountId, secret: String, created_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            secret,
            created_at,
        }
    }

    /// Time elapsed since issuance
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// A record is stale once its age strictly exceeds `max_age`
    pub fn is_expired_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age_at(now) > max_age
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh secret
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
