//! Stateless minting and verification of access tokens and refresh secrets

use std::sync::Arc;

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;

use crate::domain::entities::account::AccountId;
use crate::domain::entities::token::Claims;
use crate::errors::{InvalidTokenReason, TokenError};

use super::clock::Clock;
use super::config::TokenServiceConfig;

/// Algorithms accepted on verification
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Bytes of entropy in a refresh secret
const REFRESH_SECRET_BYTES: usize = 32;

/// Anything that can turn a bearer token into the account it speaks for
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError>;
}

/// Claims as they arrive, before the subject has been checked
#[derive(Deserialize)]
struct PresentedClaims {
    #[serde(default)]
    sub: serde_json::Value,
    exp: i64,
    #[serde(default)]
    iat: i64,
    #[serde(default)]
    jti: String,
}

// A subject that is absent or not a string becomes empty, which no account ID parses from
impl From<PresentedClaims> for Claims {
    fn from(presented: PresentedClaims) -> Self {
        Claims {
            sub: presented.sub.as_str().unwrap_or_default().to_string(),
            exp: presented.exp,
            iat: presented.iat,
            jti: presented.jti,
        }
    }
}

/// Mints access tokens and refresh secrets; verifies access tokens
pub struct TokenIssuer {
    algorithm: Algorithm,
    has_secret: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates an issuer bound to the configured signing secret
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(config.algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        // `exp` is compared against the injected clock below
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            algorithm: config.algorithm,
            has_secret: !secret.is_empty(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_token_ttl: config.access_token_ttl,
            clock,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    /// Mints a signed access token for `account_id` expiring `access_token_ttl` from now
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact JWT
    /// * `Err(TokenError::Signing)` - No secret configured, a lifetime that is not positive or
    ///   overflows, or the signer refused the key
    pub fn mint_access_token(&self, account_id: AccountId) -> Result<String, TokenError> {
        if !self.has_secret {
            return Err(TokenError::Signing {
                reason: "signing secret is not configured".to_string(),
            });
        }

        if self.access_token_ttl <= Duration::zero() {
            return Err(TokenError::Signing {
                reason: "access token lifetime must be positive".to_string(),
            });
        }

        let claims = Claims::new_access_token(account_id, self.clock.now(), self.access_token_ttl)?;
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            TokenError::Signing {
                reason: e.to_string(),
            }
        })
    }

    /// Mints 32 bytes from the OS random source, URL-safe base64 encoded
    pub fn mint_refresh_token(&self) -> Result<String, TokenError> {
        let mut bytes = [0u8; REFRESH_SECRET_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| TokenError::Entropy)?;
        Ok(URL_SAFE.encode(bytes))
    }

    /// Verifies signature, algorithm, expiry and subject of an access token
    ///
    /// # Returns
    ///
    /// * `Ok(AccountId)` - The subject of a valid token
    /// * `Err(TokenError::InvalidToken)` - Anything else, with the reason attached
    pub fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError> {
        let header = decode_header(token).map_err(|_| match raw_header_alg(token) {
            Some(alg) if !is_hmac_name(&alg) => TokenError::invalid(InvalidTokenReason::UnexpectedAlgorithm),
            _ => TokenError::invalid(InvalidTokenReason::Malformed),
        })?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::invalid(InvalidTokenReason::UnexpectedAlgorithm));
        }
        // An empty key would verify tokens anyone can forge
        if !self.has_secret {
            return Err(TokenError::invalid(InvalidTokenReason::BadSignature));
        }

        let data = decode::<PresentedClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    InvalidTokenReason::UnexpectedAlgorithm
                }
                _ => InvalidTokenReason::Malformed,
            };
            TokenError::invalid(reason)
        })?;

        let claims = Claims::from(data.claims);
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::invalid(InvalidTokenReason::Expired));
        }

        claims
            .account_id()
            .map_err(|_| TokenError::invalid(InvalidTokenReason::MissingSubject))
    }
}

impl AccessTokenVerifier for TokenIssuer {
    fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError> {
        TokenIssuer::verify_access_token(self, token)
    }
}

fn is_hmac_name(alg: &str) -> bool {
    matches!(alg, "HS256" | "HS384" | "HS512")
}

/// The `alg` header field, read without trusting anything else about the token
fn raw_header_alg(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_string)
}
