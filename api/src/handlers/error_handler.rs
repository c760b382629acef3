//! Mapping of core failures onto HTTP responses
//!
//! Every non-2xx body is an `ErrorResponse`. Refresh token rejections all share
//! one code and one message so a caller cannot tell which check failed; the
//! specific reason only reaches the logs.

use std::fmt;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use auth_core::errors::{DomainError, StoreError, TokenError};
use auth_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

pub const INVALID_REFRESH_TOKEN_MESSAGE: &str = "Invalid or expired refresh token";

/// An error ready to be rendered as a JSON response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.body.error
    }

    fn with_detail(mut self, key: &str, value: impl serde::Serialize) -> Self {
        self.body = self.body.add_detail(key, value);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

fn store_failure(err: &StoreError) -> ApiError {
    tracing::error!(error = %err, "Store failure");
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::DATABASE_ERROR,
        "A storage error occurred",
    )
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match &err {
            e if e.is_refresh_rejection() => ApiError::new(
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_REFRESH_TOKEN,
                INVALID_REFRESH_TOKEN_MESSAGE,
            ),
            TokenError::InvalidToken { .. } => ApiError::new(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_INVALID,
                "Invalid or expired access token",
            ),
            TokenError::StoreFailure(store) => store_failure(store),
            TokenError::IssuanceFailure { .. } => {
                tracing::error!(error = %err, kind = err.root_cause().kind(), "Token issuance failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::TOKEN_ISSUANCE_FAILED,
                    "Could not issue tokens",
                )
            }
            _ => {
                tracing::error!(error = %err, kind = err.kind(), "Token service failure");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "An internal error occurred",
                )
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => {
                ApiError::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
            }
            DomainError::NotFound { resource } => ApiError::new(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                format!("{} not found", resource),
            ),
            DomainError::Conflict { message } => {
                ApiError::new(StatusCode::CONFLICT, error_codes::CONFLICT, message)
            }
            DomainError::Token(token) => token.into(),
            DomainError::Store(store) => store_failure(&store),
            DomainError::Internal { message } => {
                tracing::error!(%message, "Internal error");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "An internal error occurred",
                )
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            "Request validation failed",
        )
        .with_detail("fields", fields)
    }
}

/// Renders unparsable JSON bodies as `BAD_REQUEST`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    ApiError::bad_request("Malformed request body").into()
}

/// Renders unparsable query strings as `BAD_REQUEST`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected query string");
    ApiError::bad_request("Malformed query string").into()
}
