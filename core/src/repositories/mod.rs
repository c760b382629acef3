pub mod account;
pub mod token;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
