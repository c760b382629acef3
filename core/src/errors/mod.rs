//! Domain-specific error types and error handling.

mod types;


pub use types::{InvalidTokenReason, StoreError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Whether the failure was caused by the caller rather than the server
    pub fn is_caller_fault(&self) -> bool {
        match self {
            DomainError::Validation { .. }
            | DomainError::NotFound { .. }
            | DomainError::Conflict { .. } => true,
            DomainError::Internal { .. } | DomainError::Store(_) => false,
            DomainError::Token(err) => err.is_caller_fault(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
