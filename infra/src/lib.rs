//! # Infrastructure Layer
//!
//! Concrete persistence for the authentication service, following Clean
//! Architecture principles: the repository traits live in `auth_core`, their
//! MySQL implementations live here.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlAccountRepository, MySqlRefreshTokenRepository};

use auth_core::errors::StoreError;

/// Load `.env` into the process environment, if one is present
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database call did not finish in time
    #[error("Database call timed out after {0} ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => StoreError::Unavailable {
                message: e.to_string(),
            },
            InfrastructureError::Timeout(elapsed_ms) => StoreError::Timeout { elapsed_ms },
            InfrastructureError::Config(message) => StoreError::Unavailable { message },
        }
    }
}
