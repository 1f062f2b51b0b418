use std::sync::Arc;

use actix_web::{middleware::Logger, HttpServer};
use anyhow::Context;
use log::{info, warn};

use ev_api::app::create_app;
use ev_core::services::auth::{AuthService, AuthServiceConfig};
use ev_core::services::token::{TokenService, TokenServiceConfig};
use ev_infra::database::{DatabasePool, MySqlUserRepository};
use ev_infra::security::BcryptPasswordHasher;
use ev_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    let environment = Environment::from_env();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_filter()),
    );

    info!("Starting Eventide API Server ({})", environment);

    let config = AppConfig::from_env();
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    // Storage
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if !pool
        .health_check()
        .await
        .context("database health check failed")?
    {
        anyhow::bail!("database health check returned an unexpected result");
    }
    pool.run_migrations()
        .await
        .context("failed to prepare the database schema")?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    // Services
    let token_config = TokenServiceConfig::try_from(&config.auth.jwt)
        .context("invalid JWT configuration")?;
    let token_service = Arc::new(
        TokenService::new(user_repository.clone(), token_config)
            .context("failed to build the token service")?,
    );
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
        AuthServiceConfig::from(&config.auth),
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server =
        HttpServer::new(move || create_app(auth_service.clone()).wrap(Logger::default()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
