//! Account endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{AccountRepository, RefreshTokenRepository};

use crate::app::AppState;
use crate::dto::{AccountResponse, CreateAccountRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/accounts
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "number": "+15550100" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid email or number
/// - 409 Conflict: the email already has an account
pub async fn create_account<R, A>(
    state: web::Data<AppState<R, A>>,
    request: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    request.validate()?;

    let account = state
        .account_service
        .create_account(request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Handler for GET /api/v1/accounts/me
///
/// Requires a bearer access token; answers with the account it was issued for.
pub async fn current_account<R, A>(
    state: web::Data<AppState<R, A>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let account = state.account_service.get_account(auth.account_id).await?;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}
