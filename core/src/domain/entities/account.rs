//! Account entity representing a registered account holder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an account, also the subject of its access tokens
pub type AccountId = Uuid;

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: AccountId,

    /// Login email, unique across accounts
    pub email: String,

    /// Optional contact number
    pub number: Option<String>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a fresh identifier
    pub fn new(email: String, number: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            number,
            created_at,
        }
    }
}

/// Data required to register an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub number: Option<String>,
}

impl NewAccount {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            number: None,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }
}
