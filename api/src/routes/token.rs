//! Token issuance and refresh token rotation

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use auth_core::repositories::{AccountRepository, RefreshTokenRepository};

use crate::app::AppState;
use crate::dto::{RefreshTokenRequest, TokenQuery, TokenResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/token?guid=<account id>
///
/// Issues a new pair for the account, replacing any refresh token it held.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "q0Zy...",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `guid` missing or not a UUID
/// - 500 Internal Server Error: signing, entropy or store failure
pub async fn issue_token<R, A>(
    state: web::Data<AppState<R, A>>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let account_id = parse_guid(query.into_inner().guid)?;
    let pair = state.token_service.issue(account_id).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

/// Handler for POST /api/v1/refresh-token
///
/// Exchanges a live refresh token for a new pair. The presented token stops
/// working once this succeeds.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "string" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: unparsable body
/// - 401 Unauthorized: unknown, expired, mismatched or superseded refresh token,
///   always with the same body
/// - 500 Internal Server Error: store or issuance failure
pub async fn refresh_token<R, A>(
    state: web::Data<AppState<R, A>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let pair = state.token_service.rotate(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

fn parse_guid(guid: Option<String>) -> Result<Uuid, ApiError> {
    let guid = guid
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| ApiError::bad_request("guid is required"))?;

    Uuid::parse_str(guid).map_err(|_| ApiError::bad_request("guid must be a UUID"))
}
