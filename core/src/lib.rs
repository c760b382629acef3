//! # Auth Core
//!
//! Core business logic for the authentication service: account and token
//! entities, typed errors, repository interfaces, the access token issuer and
//! the refresh token rotator.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, AccountId, Claims, NewAccount, RefreshRecord, TokenPair};
pub use errors::{DomainError, DomainResult, InvalidTokenReason, StoreError, TokenError};
pub use repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryRefreshTokenRepository,
    RefreshTokenRepository,
};
pub use services::{
    AccessTokenVerifier, AccountService, Clock, ManualClock, SecretStorage, SystemClock,
    TokenIssuer, TokenService, TokenServiceConfig,
};
