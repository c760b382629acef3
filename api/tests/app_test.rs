//! Integration tests for health, 404 handling and the bearer middleware

mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use uuid::Uuid;

use auth_api::create_app;
use auth_api::middleware::{AuthContext, JwtAuth};
use auth_core::errors::{InvalidTokenReason, TokenError};
use auth_core::services::AccessTokenVerifier;
use common::{read_json, TestContext};

#[actix_web::test]
async fn test_ping() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::get().uri("/api/v1/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["msg"], "pong");
}

#[actix_web::test]
async fn test_health_reports_store_state() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    // Slower than the 200ms health deadline
    ctx.tokens.set_delay(Duration::from_secs(2));
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(resp).await["status"], "unhealthy");
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::get().uri("/api/v1/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(resp).await["error"], "NOT_FOUND");
}

struct FixedVerifier(Uuid);

impl AccessTokenVerifier for FixedVerifier {
    fn verify_access_token(&self, token: &str) -> Result<Uuid, TokenError> {
        if token == "good" {
            Ok(self.0)
        } else {
            Err(TokenError::InvalidToken {
                reason: InvalidTokenReason::BadSignature,
            })
        }
    }
}

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().body(auth.account_id.to_string())
}

#[actix_web::test]
async fn test_middleware_with_explicit_verifier() {
    let account_id = Uuid::new_v4();
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::with_verifier(Arc::new(FixedVerifier(account_id))))
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Bearer good"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, account_id.to_string());

    for header in ["Bearer bad", "Basic Z29vZA==", "good"] {
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", header);
    }
}

#[actix_web::test]
async fn test_middleware_without_verifier_refuses() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new())
            .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Bearer good"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_auth_context_requires_middleware() {
    let app = test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
