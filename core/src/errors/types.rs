//! Token and persistence error types
//!
//! Every failure of the issuer, the rotator and the stores is a distinct variant
//! carrying structured context, so the transport can branch on the kind
//! without inspecting message text.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Why an access token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// Not a parsable JWT, or claims of the wrong shape
    Malformed,
    /// Signature does not verify with the configured secret
    BadSignature,
    /// Header names a non-HMAC algorithm
    UnexpectedAlgorithm,
    /// `exp` is in the past
    Expired,
    /// `sub` absent, empty, or not an account ID
    MissingSubject,
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidTokenReason::Malformed => "malformed",
            InvalidTokenReason::BadSignature => "bad signature",
            InvalidTokenReason::UnexpectedAlgorithm => "unexpected signing algorithm",
            InvalidTokenReason::Expired => "expired",
            InvalidTokenReason::MissingSubject => "missing subject",
        };
        f.write_str(reason)
    }
}

/// Persistence collaborator failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store call timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store query failed: {message}")]
    Query { message: String },

    #[error("Duplicate key: {key}")]
    Duplicate { key: String },

    #[error("Corrupt record: {message}")]
    Corrupt { message: String },
}

/// Token issuance, verification and rotation errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Access token signing failed: {reason}")]
    Signing { reason: String },

    #[error("Secure random source unavailable")]
    Entropy,

    #[error("Invalid access token: {reason}")]
    InvalidToken { reason: InvalidTokenReason },

    #[error("Unknown refresh token")]
    UnknownToken,

    #[error("Refresh token for account {account_id} expired ({age_secs}s old)")]
    ExpiredToken { account_id: Uuid, age_secs: i64 },

    #[error("Refresh token mismatch for account {account_id}")]
    TokenMismatch { account_id: Uuid },

    #[error("Concurrent rotation lost for account {account_id}")]
    RotationConflict { account_id: Uuid },

    #[error("Refresh store failure: {0}")]
    StoreFailure(#[from] StoreError),

    #[error("Token issuance failed for account {account_id}: {source}")]
    IssuanceFailure {
        account_id: Uuid,
        #[source]
        source: Box<TokenError>,
    },
}

impl TokenError {
    pub(crate) fn invalid(reason: InvalidTokenReason) -> Self {
        TokenError::InvalidToken { reason }
    }

    pub(crate) fn issuance(account_id: Uuid, source: TokenError) -> Self {
        TokenError::IssuanceFailure {
            account_id,
            source: Box::new(source),
        }
    }

    /// Caller faults are answered with "unauthorized" and never logged as server errors
    pub fn is_caller_fault(&self) -> bool {
        match self {
            TokenError::InvalidToken { .. }
            | TokenError::UnknownToken
            | TokenError::ExpiredToken { .. }
            | TokenError::TokenMismatch { .. }
            | TokenError::RotationConflict { .. } => true,
            TokenError::Signing { .. } | TokenError::Entropy | TokenError::StoreFailure(_) => false,
            TokenError::IssuanceFailure { source, .. } => source.is_caller_fault(),
        }
    }

    /// A presented refresh token was refused
    pub fn is_refresh_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::UnknownToken
                | TokenError::ExpiredToken { .. }
                | TokenError::TokenMismatch { .. }
                | TokenError::RotationConflict { .. }
        )
    }

    /// The innermost error, looking through `IssuanceFailure`
    pub fn root_cause(&self) -> &TokenError {
        match self {
            TokenError::IssuanceFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Stable machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Signing { .. } => "signing_error",
            TokenError::Entropy => "entropy_error",
            TokenError::InvalidToken { .. } => "invalid_token",
            TokenError::UnknownToken => "unknown_token",
            TokenError::ExpiredToken { .. } => "expired_token",
            TokenError::TokenMismatch { .. } => "token_mismatch",
            TokenError::RotationConflict { .. } => "rotation_conflict",
            TokenError::StoreFailure(_) => "store_failure",
            TokenError::IssuanceFailure { .. } => "issuance_failure",
        }
    }
}
