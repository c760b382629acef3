//! Shared configuration and response types for the token server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - The uniform error response body and its stable error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    RefreshTokenConfig, RotationMode, SecretStorageMode, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
