//! Integration tests for the account endpoints

mod common;

use actix_cors::Cors;
use actix_web::{http::StatusCode, test};
use serde_json::json;
use uuid::Uuid;

use auth_api::create_app;
use common::{read_json, TestContext};

#[actix_web::test]
async fn test_create_account() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": "ada@example.com", "number": "+15550100" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = read_json(resp).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["number"], "+15550100");
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[actix_web::test]
async fn test_create_account_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "email": "grace@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_create_account_validation() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": "not-an-email", "number": "1".repeat(21) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = read_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let fields = body["details"]["fields"].as_array().unwrap();
    assert!(fields.contains(&json!("email")));
    assert!(fields.contains(&json!("number")));
}

#[actix_web::test]
async fn test_current_account_with_issued_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .set_json(json!({ "email": "linus@example.com" }))
        .to_request();
    let account = read_json(test::call_service(&app, req).await).await;
    let id = account["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/token?guid={}", id))
        .to_request();
    let tokens = read_json(test::call_service(&app, req).await).await;
    let access = tokens["access_token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts/me")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "linus@example.com");
}

#[actix_web::test]
async fn test_current_account_unknown_subject_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;
    let access = ctx
        .state
        .token_service
        .issuer()
        .mint_access_token(Uuid::new_v4())
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts/me")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_current_account_requires_bearer() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), Cors::permissive())).await;

    let req = test::TestRequest::get().uri("/api/v1/accounts/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = read_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}
