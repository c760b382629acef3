//! Token service module
//!
//! This module handles all token-related operations:
//! - JWT access token minting and stateless verification (`TokenIssuer`)
//! - Refresh secret minting, storage policy and rotation (`TokenService`)
//! - The clock both of them read, injectable for tests

mod clock;
mod config;
mod issuer;
mod service;
mod storage;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use issuer::{AccessTokenVerifier, TokenIssuer, HMAC_ALGORITHMS};
pub use service::TokenService;
pub use storage::SecretStorage;
