//! MySQL implementations of the `auth_core` repository traits

mod account_repository;
mod refresh_token_repository;

pub use account_repository::MySqlAccountRepository;
pub use refresh_token_repository::MySqlRefreshTokenRepository;

use std::future::Future;
use std::time::Duration;

use auth_core::errors::StoreError;

/// Translate a SQLx failure into the store error the core understands
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
            key: db.constraint().unwrap_or("unique").to_string(),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable {
                message: format!("{}: {}", context, err),
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt {
                message: format!("{}: {}", context, err),
            }
        }
        other => StoreError::Query {
            message: format!("{}: {}", context, other),
        },
    }
}

/// Run a query, failing with `StoreError::Timeout` once `deadline` passes
pub(crate) async fn bounded<T, F>(deadline: Duration, context: &str, query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(result) => result.map_err(|e| store_error(context, e)),
        Err(_) => Err(StoreError::Timeout {
            elapsed_ms: deadline.as_millis() as u64,
        }),
    }
}
