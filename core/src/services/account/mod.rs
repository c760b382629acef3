//! Account service module
//!
//! Registration and lookup of account holders. Token issuance refers to
//! accounts only by ID and never goes through this service.

mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use service::AccountService;
pub use validation::{validate_email, validate_number, MAX_NUMBER_LEN};
