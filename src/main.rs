use std::sync::Arc;

use alphabrain::core::auth::{AuthApiState, AuthService, JwtService, auth_api_router};
use alphabrain::core::config::{Config, ConfigError};
use alphabrain::core::db::{
    DbError, InMemoryUserRepository, UserDirectory, UserRepository, create_pool,
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("User directory unavailable: {0}")]
    Database(#[from] DbError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let jwt_service = JwtService::new(config.jwt_config()).map_err(ConfigError::from)?;
    let hasher = config.password_hasher()?;

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, token_ttl_minutes={}, bcrypt_cost={}",
        config.has_database(),
        jwt_service.token_ttl_minutes(),
        hasher.cost()
    );

    let directory: Arc<dyn UserDirectory> = match config.db_config() {
        Some(db_config) => {
            let pool = create_pool(&db_config).await?;
            Arc::new(UserRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory only");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let auth_service = AuthService::new(directory, hasher, jwt_service);

    let app = auth_api_router(AuthApiState { auth_service }).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
