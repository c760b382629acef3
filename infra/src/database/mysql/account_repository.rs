//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::time::Duration;
use uuid::Uuid;

use auth_core::domain::entities::account::{Account, AccountId};
use auth_core::errors::StoreError;
use auth_core::repositories::AccountRepository;

use super::bounded;

const SELECT_COLUMNS: &str = "SELECT id, email, number, created_at FROM accounts";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, StoreError> {
        let corrupt = |e: sqlx::Error| StoreError::Corrupt {
            message: format!("accounts row: {}", e),
        };

        let id: String = row.try_get("id").map_err(corrupt)?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt {
                message: format!("Invalid account UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(corrupt)?,
            number: row.try_get("number").map_err(corrupt)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(corrupt)?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<Account>, StoreError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, filter);
        let row = bounded(
            self.query_timeout,
            "Failed to find account",
            sqlx::query(&query).bind(value).fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create_account(&self, account: Account) -> Result<Account, StoreError> {
        let query = r#"
            INSERT INTO accounts (id, email, number, created_at)
            VALUES (?, ?, ?, ?)
        "#;

        bounded(
            self.query_timeout,
            "Failed to create account",
            sqlx::query(query)
                .bind(account.id.to_string())
                .bind(&account.email)
                .bind(&account.number)
                .bind(account.created_at)
                .execute(&self.pool),
        )
        .await?;

        Ok(account)
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.find_one("email", email.to_string()).await
    }
}
