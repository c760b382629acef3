//! Unit tests for the account entity

use chrono::Utc;

use crate::domain::entities::account::{Account, NewAccount};

#[test]
fn test_account_creation() {
    let now = Utc::now();
    let account = Account::new("a@example.com".to_string(), Some("555".to_string()), now);

    assert_eq!(account.email, "a@example.com");
    assert_eq!(account.number.as_deref(), Some("555"));
    assert_eq!(account.created_at, now);
}

#[test]
fn test_accounts_get_distinct_ids() {
    let now = Utc::now();
    let a = Account::new("a@example.com".to_string(), None, now);
    let b = Account::new("a@example.com".to_string(), None, now);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_new_account_builder() {
    let new_account = NewAccount::new("b@example.com").with_number("+61400000000");
    assert_eq!(new_account.email, "b@example.com");
    assert_eq!(new_account.number.as_deref(), Some("+61400000000"));
}
