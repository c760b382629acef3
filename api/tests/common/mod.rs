//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::time::Duration;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use serde_json::Value;

use auth_api::AppState;
use auth_core::repositories::{InMemoryAccountRepository, InMemoryRefreshTokenRepository};
use auth_core::services::{AccountService, TokenService, TokenServiceConfig};

pub const SECRET: &str = "api-test-secret-that-is-long-enough";

pub type TestState = AppState<InMemoryRefreshTokenRepository, InMemoryAccountRepository>;

/// App state plus handles on the stores behind it
pub struct TestContext {
    pub tokens: InMemoryRefreshTokenRepository,
    pub accounts: InMemoryAccountRepository,
    pub state: web::Data<TestState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(TokenServiceConfig::with_secret(SECRET))
    }

    pub fn with_config(config: TokenServiceConfig) -> Self {
        let tokens = InMemoryRefreshTokenRepository::new();
        let accounts = InMemoryAccountRepository::new();
        let state = web::Data::new(AppState::new(
            TokenService::new(tokens.clone(), config),
            AccountService::new(accounts.clone()),
            Duration::from_millis(200),
        ));

        Self {
            tokens,
            accounts,
            state,
        }
    }
}

pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}
