//! Account registration and lookup

use chrono::Utc;

use crate::domain::entities::account::{Account, AccountId, NewAccount};
use crate::errors::{DomainError, DomainResult, StoreError};
use crate::repositories::AccountRepository;

use super::validation::{validate_email, validate_number};

/// Service for creating and reading accounts
pub struct AccountService<R: AccountRepository> {
    repository: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Registers a new account
    ///
    /// # Arguments
    ///
    /// * `request` - Email (required, unique) and optional contact number
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The stored account with its new ID
    /// * `Err(DomainError::Validation)` - Email or number is malformed
    /// * `Err(DomainError::Conflict)` - The email is already registered
    /// * `Err(DomainError::Store)` - The account store failed
    pub async fn create_account(&self, request: NewAccount) -> DomainResult<Account> {
        let email = request.email.trim().to_string();
        validate_email(&email)?;

        let number = match request.number.map(|n| n.trim().to_string()) {
            Some(n) if n.is_empty() => None,
            Some(n) => {
                validate_number(&n)?;
                Some(n)
            }
            None => None,
        };

        if self.repository.find_account_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Account registration refused, email taken");
            return Err(DomainError::Conflict {
                message: "account with this email already exists".to_string(),
            });
        }

        let account = Account::new(email, number, Utc::now());
        let account = match self.repository.create_account(account).await {
            Ok(account) => account,
            // Lost a race with another registration of the same email
            Err(StoreError::Duplicate { .. }) => {
                return Err(DomainError::Conflict {
                    message: "account with this email already exists".to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Loads an account by ID
    pub async fn get_account(&self, id: AccountId) -> DomainResult<Account> {
        self.repository
            .find_account_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", id),
            })
    }
}
