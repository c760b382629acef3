//! Request and response bodies

pub mod account_dto;
pub mod token_dto;

pub use account_dto::{AccountResponse, CreateAccountRequest};
pub use token_dto::{RefreshTokenRequest, TokenQuery, TokenResponse};
