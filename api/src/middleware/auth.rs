//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it with the registered `AccessTokenVerifier`, and injects the
//! caller's account into the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use auth_core::domain::entities::account::AccountId;
use auth_core::services::token::AccessTokenVerifier;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;

/// Authenticated caller, injected into requests that passed `JwtAuth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the verified access token
    pub account_id: AccountId,
}

/// JWT authentication middleware factory
///
/// Uses the verifier it was built with, or else the `web::Data<dyn AccessTokenVerifier>`
/// registered on the app.
#[derive(Clone, Default)]
pub struct JwtAuth {
    verifier: Option<Arc<dyn AccessTokenVerifier>>,
}

impl JwtAuth {
    /// Verify with whatever verifier the app registers
    pub fn new() -> Self {
        Self { verifier: None }
    }

    /// Verify with a specific verifier
    pub fn with_verifier(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self {
            verifier: Some(verifier),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Option<Arc<dyn AccessTokenVerifier>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone().or_else(|| {
            req.app_data::<web::Data<dyn AccessTokenVerifier>>()
                .map(|data| data.clone().into_inner())
        });

        Box::pin(async move {
            match authenticate(&req, verifier.as_deref()) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(
    req: &ServiceRequest,
    verifier: Option<&dyn AccessTokenVerifier>,
) -> Result<AuthContext, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;
    let token = extract_bearer_token(header.to_str().unwrap_or_default())
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization header format"))?;

    let verifier = verifier.ok_or_else(|| {
        tracing::error!("JwtAuth has no access token verifier registered");
        ApiError::unauthorized("Authentication unavailable")
    })?;

    match verifier.verify_access_token(token) {
        Ok(account_id) => Ok(AuthContext { account_id }),
        Err(err) => {
            tracing::warn!(reason = %err, "Access token rejected");
            Err(err.into())
        }
    }
}

/// Extracts the token from a `Bearer <token>` header value
fn extract_bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("Authentication required").into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer test_token_123"), Some("test_token_123"));
        assert_eq!(extract_bearer_token("test_token_123"), None);
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(extract_bearer_token("Bearer a b"), None);
    }
}
