//! Field validation for account registration

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DomainError;

/// Longest contact number the account store accepts
pub const MAX_NUMBER_LEN: usize = 20;

/// Local part, `@`, then a dotted domain with an alphabetic TLD
static EMAIL_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
});

/// Digits with an optional leading `+`, spaces and dashes allowed between groups
static NUMBER_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*[0-9]$"));

fn compiled(regex: &'static Lazy<Result<Regex, regex::Error>>) -> Result<&'static Regex, DomainError> {
    Lazy::force(regex).as_ref().map_err(|e| DomainError::Internal {
        message: format!("invalid validation pattern: {}", e),
    })
}

/// Checks that `email` is a syntactically valid address
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::Validation {
            message: "email is required".to_string(),
        });
    }
    if !compiled(&EMAIL_REGEX)?.is_match(email) {
        return Err(DomainError::Validation {
            message: format!("'{}' is not a valid email address", email),
        });
    }
    Ok(())
}

/// Checks an optional contact number
pub fn validate_number(number: &str) -> Result<(), DomainError> {
    if number.len() > MAX_NUMBER_LEN {
        return Err(DomainError::Validation {
            message: format!("number must be at most {} characters", MAX_NUMBER_LEN),
        });
    }
    if !compiled(&NUMBER_REGEX)?.is_match(number) {
        return Err(DomainError::Validation {
            message: "number may only contain digits, spaces, dashes and a leading '+'".to_string(),
        });
    }
    Ok(())
}
