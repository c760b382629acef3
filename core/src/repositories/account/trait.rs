//! Account repository trait defining the interface for account persistence.
//!
//! Account records are owned by this collaborator; the token core only ever
//! refers to them by ID.

use async_trait::async_trait;

use crate::domain::entities::account::{Account, AccountId};
use crate::errors::StoreError;

/// Repository trait for Account entity persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(StoreError::Duplicate)` - The email is already registered
    /// * `Err(StoreError)` - Write failed
    async fn create_account(&self, account: Account) -> Result<Account, StoreError>;

    /// Find an account by its ID
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given ID
    /// * `Err(StoreError)` - Read failed
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Find an account by its email address
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}
