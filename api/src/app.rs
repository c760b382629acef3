//! Application state and factory
//!
//! This module holds the state shared by every worker and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use auth_core::repositories::{AccountRepository, RefreshTokenRepository};
use auth_core::services::{AccessTokenVerifier, AccountService, TokenService};
use auth_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::{json_error_handler, query_error_handler};
use crate::middleware::JwtAuth;
use crate::routes::{account, health, token};

/// Services shared by all request handlers
pub struct AppState<R, A>
where
    R: RefreshTokenRepository,
    A: AccountRepository,
{
    pub token_service: Arc<TokenService<R>>,
    pub account_service: AccountService<A>,
    /// Upper bound on `GET /health`
    pub health_check_timeout: Duration,
}

impl<R, A> AppState<R, A>
where
    R: RefreshTokenRepository,
    A: AccountRepository,
{
    pub fn new(
        token_service: TokenService<R>,
        account_service: AccountService<A>,
        health_check_timeout: Duration,
    ) -> Self {
        Self {
            token_service: Arc::new(token_service),
            account_service,
            health_check_timeout,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, A>(
    state: web::Data<AppState<R, A>>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = state.token_service.clone();

    App::new()
        .app_data(state)
        .app_data(web::Data::from(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // The last wrap is outermost, so request spans also cover CORS rejections
        .wrap(cors)
        .wrap(TracingLogger::default())
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health::health_check::<R, A>))
                .route("/ping", web::get().to(health::ping))
                .route("/token", web::post().to(token::issue_token::<R, A>))
                .route("/refresh-token", web::post().to(token::refresh_token::<R, A>))
                .route("/accounts", web::post().to(account::create_account::<R, A>))
                .service(
                    web::resource("/accounts/me")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(account::current_account::<R, A>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
