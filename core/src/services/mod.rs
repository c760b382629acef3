//! Business services containing domain logic and use cases.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::AccountService;
pub use token::{
    AccessTokenVerifier, Clock, ManualClock, SecretStorage, SystemClock, TokenIssuer,
    TokenService, TokenServiceConfig,
};
