//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management with a bounded health check
//! - Schema bootstrap for the `accounts` and `refresh_tokens` tables
//! - Repository implementations for the `auth_core` traits

pub mod connection;
pub mod mysql;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAccountRepository, MySqlRefreshTokenRepository};
