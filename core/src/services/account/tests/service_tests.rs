//! Unit tests for the account service

use uuid::Uuid;

use crate::domain::entities::account::NewAccount;
use crate::errors::DomainError;
use crate::repositories::InMemoryAccountRepository;
use crate::services::account::AccountService;

fn service() -> AccountService<InMemoryAccountRepository> {
    AccountService::new(InMemoryAccountRepository::new())
}

#[tokio::test]
async fn test_create_and_get_account() {
    let service = service();

    let account = service
        .create_account(NewAccount::new("a@example.com").with_number("+61412345678"))
        .await
        .unwrap();
    assert_eq!(account.email, "a@example.com");
    assert_eq!(account.number.as_deref(), Some("+61412345678"));

    let loaded = service.get_account(account.id).await.unwrap();
    assert_eq!(loaded, account);
}

#[tokio::test]
async fn test_email_is_trimmed_and_blank_number_dropped() {
    let service = service();
    let account = service
        .create_account(NewAccount::new("  b@example.com ").with_number("  "))
        .await
        .unwrap();

    assert_eq!(account.email, "b@example.com");
    assert!(account.number.is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let service = service();
    service.create_account(NewAccount::new("c@example.com")).await.unwrap();

    let err = service
        .create_account(NewAccount::new("c@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
    assert!(err.is_caller_fault());
}

#[tokio::test]
async fn test_invalid_fields_rejected() {
    let service = service();

    let err = service.create_account(NewAccount::new("not-an-email")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = service
        .create_account(NewAccount::new("d@example.com").with_number("call me maybe"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn test_get_missing_account() {
    let err = service().get_account(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
