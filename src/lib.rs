//! Habits account service
//!
//! Login and signup for the habits tracker:
//! - bcrypt password hashing
//! - HS256 session tokens with a fixed one-hour lifetime
//! - Field-scoped error bodies (422 / 401 / 500)
//! - In-memory or PostgreSQL user storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use config::StorageBackend;
use domain::user::UserRepository;
use infrastructure::{
    auth::{JwtConfig, JwtService, TokenIssuer},
    storage::{connect_pool, run_migrations, PostgresConfig},
    user::{AuthService, AuthSettings, BcryptHasher, InMemoryUserRepository, PostgresUserRepository},
};
use tracing::info;

/// Create the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::new(config.auth.jwt_secret.clone())
        .context("Invalid token signing configuration")?;
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtService::new(&jwt_config));

    let hasher = Arc::new(BcryptHasher::with_cost(config.auth.bcrypt_cost));
    let settings = AuthSettings {
        expires_in_seconds: config.auth.expires_in_seconds,
    };

    info!(
        backend = ?config.storage.backend,
        bcrypt_cost = config.auth.bcrypt_cost,
        expires_in_seconds = config.auth.expires_in_seconds,
        "Creating application state"
    );

    let state = match config.storage.backend {
        StorageBackend::Memory => {
            build_state(Arc::new(InMemoryUserRepository::new()), hasher, tokens, settings)
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(config).await?;

            if config.storage.run_migrations {
                let version = run_migrations(&pool)
                    .await
                    .context("Failed to apply migrations")?;
                info!(version = ?version, "Database schema up to date");
            }

            build_state(
                Arc::new(PostgresUserRepository::new(pool)),
                hasher,
                tokens,
                settings,
            )
        }
    };

    Ok(state)
}

/// Open the PostgreSQL pool described by the storage section
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = config
        .storage
        .database_url
        .as_deref()
        .context("storage.database_url is required for the postgres backend")?;

    info!("Connecting to PostgreSQL...");

    let pool = connect_pool(
        &PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
    )
    .await?;

    info!("PostgreSQL connection established");

    Ok(pool)
}

fn build_state<R: UserRepository + 'static>(
    repository: Arc<R>,
    hasher: Arc<BcryptHasher>,
    tokens: Arc<dyn TokenIssuer>,
    settings: AuthSettings,
) -> AppState {
    AppState::new(Arc::new(AuthService::new(
        repository, hasher, tokens, settings,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "lib-test-secret".to_string();
        config.auth.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn test_memory_state_is_ready() {
        let state = create_app_state_with_config(&memory_config()).await.unwrap();
        assert!(state.auth_service.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_secret_is_fatal() {
        let mut config = memory_config();
        config.auth.jwt_secret = String::new();

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_postgres_without_url_is_fatal() {
        let mut config = memory_config();
        config.storage.backend = StorageBackend::Postgres;

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
