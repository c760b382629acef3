//! Domain entities representing core business objects.

pub mod account;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use account::{Account, AccountId, NewAccount};
pub use token::{
    Claims, RefreshRecord, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_MAX_AGE_DAYS,
};
