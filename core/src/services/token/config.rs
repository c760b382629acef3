//! Configuration for the token service

use std::str::FromStr;
use std::time::Duration as StdDuration;

use auth_shared::config::{AuthConfig, RotationMode};
use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_MAX_AGE_DAYS};
use crate::errors::TokenError;

use super::issuer::HMAC_ALGORITHMS;
use super::storage::SecretStorage;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm, HMAC family only
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Age past which a refresh secret is refused
    pub refresh_token_max_age: Duration,
    /// How refresh secrets are kept at rest
    pub secret_storage: SecretStorage,
    /// Behaviour of racing rotations
    pub rotation_mode: RotationMode,
    /// Deadline for each store call
    pub store_timeout: StdDuration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            algorithm: Algorithm::HS512,
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            refresh_token_max_age: Duration::days(REFRESH_TOKEN_MAX_AGE_DAYS),
            secret_storage: SecretStorage::Plain,
            rotation_mode: RotationMode::LastWriteWins,
            store_timeout: StdDuration::from_secs(3),
        }
    }
}

impl TokenServiceConfig {
    /// Default configuration with the given signing secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Build from the process-wide authentication settings
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Ready to hand to `TokenService::new`
    /// * `Err(TokenError::Signing)` - The configured algorithm is not HMAC, or a
    ///   lifetime is not a positive, representable number of seconds
    pub fn from_auth_config(auth: &AuthConfig, store_timeout: StdDuration) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(&auth.jwt.algorithm).map_err(|_| TokenError::Signing {
            reason: format!("unknown algorithm {}", auth.jwt.algorithm),
        })?;
        if !HMAC_ALGORITHMS.contains(&algorithm) {
            return Err(TokenError::Signing {
                reason: format!("{:?} is not an HMAC algorithm", algorithm),
            });
        }

        Ok(Self {
            jwt_secret: auth.jwt.secret.clone(),
            algorithm,
            access_token_ttl: lifetime("access token expiry", auth.jwt.access_token_expiry)?,
            refresh_token_max_age: lifetime("refresh token max age", auth.jwt.refresh_token_max_age)?,
            secret_storage: auth.refresh.storage.into(),
            rotation_mode: auth.refresh.rotation,
            store_timeout,
        })
    }
}

fn lifetime(name: &str, secs: i64) -> Result<Duration, TokenError> {
    Duration::try_seconds(secs)
        .filter(|d| *d > Duration::zero())
        .ok_or_else(|| TokenError::Signing {
            reason: format!("{} of {}s is out of range", name, secs),
        })
}
