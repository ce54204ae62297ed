use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bc_api::{create_app, AppState};
use bc_core::services::{AuthServiceConfig, SessionManager};
use bc_infra::cache::{RedisClient, RedisMessageStore, RedisSessionStore};
use bc_infra::database::{DatabasePool, MySqlChatRepository, MySqlUserRepository};
use bc_shared::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting BChat API server"
    );

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to MySQL")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;

    let user_repository = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));
    let chat_repository = Arc::new(MySqlChatRepository::new(database.get_pool().clone()));
    let message_store = Arc::new(RedisMessageStore::new(redis.clone()));

    // One manager per process: its signing secret dies with the process, so
    // a restart invalidates every outstanding token.
    let session_manager = Arc::new(SessionManager::new(
        RedisSessionStore::new(redis),
        config.session.clone(),
    ));

    let app_state = web::Data::new(AppState::new(
        user_repository,
        chat_repository,
        message_store,
        session_manager,
        AuthServiceConfig::from_env(),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` takes precedence over `LOG_LEVEL`
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => subscriber.with(fmt::layer().json()).init(),
        LogFormat::Pretty => subscriber.with(fmt::layer().pretty()).init(),
        LogFormat::Compact => subscriber.with(fmt::layer().compact()).init(),
    }
}
