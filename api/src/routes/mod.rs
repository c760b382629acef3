//! Route handlers
//!
//! - `health` - Liveness and store reachability
//! - `token` - Token issuance and refresh token rotation
//! - `account` - Account creation and lookup

pub mod account;
pub mod health;
pub mod token;
