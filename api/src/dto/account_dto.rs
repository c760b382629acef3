use auth_core::domain::entities::account::{Account, NewAccount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(max = 20, message = "Number is too long"))]
    pub number: Option<String>,
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(request: CreateAccountRequest) -> Self {
        NewAccount {
            email: request.email,
            number: request.number,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            number: account.number,
            created_at: account.created_at,
        }
    }
}
