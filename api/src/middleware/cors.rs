//! CORS middleware configuration for cross-origin requests.
//!
//! Permissive in development. Elsewhere only the origins listed in
//! `ALLOWED_ORIGINS` are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use auth_shared::config::{Environment, ServerConfig};

const MAX_AGE_SECS: usize = 3600;

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        tracing::debug!("Configuring permissive CORS for development");
        return Cors::permissive().max_age(MAX_AGE_SECS);
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(MAX_AGE_SECS);

    for origin in &server.allowed_origins {
        tracing::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    fn server_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_production_cors_allows_listed_origin_only() {
        let server = server_with_origins(&["https://app.example.com"]);
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Production, &server))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let denied = match resp {
            Ok(resp) => resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none(),
            Err(_) => true,
        };
        assert!(denied);
    }

    #[actix_web::test]
    async fn test_development_cors_is_permissive() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(Environment::Development, &ServerConfig::default()))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }
}
