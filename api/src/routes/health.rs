//! Health endpoints

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

use auth_core::repositories::{AccountRepository, RefreshTokenRepository};

use crate::app::AppState;

/// Handler for GET /api/v1/health
///
/// Pings the refresh token store, giving up after the configured health check
/// timeout.
///
/// ## Success (200 OK)
/// ```json
/// { "status": "healthy", "database": "connected", "version": "0.1.0" }
/// ```
///
/// ## Errors
/// - 503 Service Unavailable: the store did not answer in time or failed
pub async fn health_check<R, A>(state: web::Data<AppState<R, A>>) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let probe = state.token_service.health_check();
    let reachable = match tokio::time::timeout(state.health_check_timeout, probe).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Store health check failed");
            false
        }
        Err(_) => {
            tracing::error!(
                timeout_ms = state.health_check_timeout.as_millis() as u64,
                "Store health check timed out"
            );
            false
        }
    };

    let (status, health, database) = if reachable {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    HttpResponse::build(status).json(json!({
        "status": health,
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for GET /api/v1/ping
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "msg": "pong" }))
}
