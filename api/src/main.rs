use actix_web::{web, HttpServer};
use anyhow::Context;

use auth_api::middleware::create_cors;
use auth_api::{create_app, telemetry, AppState};
use auth_core::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryRefreshTokenRepository,
    RefreshTokenRepository,
};
use auth_core::services::{AccountService, TokenService, TokenServiceConfig};
use auth_infra::{DatabasePool, MySqlAccountRepository, MySqlRefreshTokenRepository};
use auth_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    auth_infra::load_dotenv();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(environment = %config.environment, "Starting auth API server");

    let token_config =
        TokenServiceConfig::from_auth_config(&config.auth, config.database.query_timeout())
            .context("Invalid token configuration")?;
    if !config.auth.jwt.has_secret() {
        tracing::warn!("JWT_SECRET is not set; token issuance will fail");
    }

    if config.database.url.is_some() {
        let pool = DatabasePool::new(&config.database)
            .await
            .context("Could not connect to the database")?;
        pool.ensure_schema()
            .await
            .context("Could not create the database schema")?;

        let tokens = MySqlRefreshTokenRepository::new(pool.get_pool().clone(), pool.query_timeout());
        let accounts = MySqlAccountRepository::new(pool.get_pool().clone(), pool.query_timeout());
        let served = serve(&config, token_config, tokens, accounts).await;

        pool.close().await;
        served
    } else {
        tracing::warn!("DATABASE_URL is not set; using in-memory stores, nothing survives a restart");
        serve(
            &config,
            token_config,
            InMemoryRefreshTokenRepository::new(),
            InMemoryAccountRepository::new(),
        )
        .await
    }
}

async fn serve<R, A>(
    config: &AppConfig,
    token_config: TokenServiceConfig,
    tokens: R,
    accounts: A,
) -> anyhow::Result<()>
where
    R: RefreshTokenRepository + 'static,
    A: AccountRepository + 'static,
{
    let state = web::Data::new(AppState::new(
        TokenService::new(tokens, token_config),
        AccountService::new(accounts),
        config.database.health_check_timeout(),
    ));

    let environment = config.environment;
    let server_config = config.server.clone();
    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), create_cors(environment, &server_config))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Could not bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")
}
