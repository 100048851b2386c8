//! Techlog Article API
//!
//! A small article and user-account backend in a ports-and-adapters
//! layout: HTTP handlers call application services, services enforce the
//! account-uniqueness invariant and the soft-delete lifecycle, and
//! persistence adapters (in-memory or PostgreSQL) sit behind repository
//! traits.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::AppState;
use infrastructure::article::{ArticleService, InMemoryArticleRepository, PostgresArticleRepository};
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::user::{
    AccountService, Argon2Hasher, InMemoryUserRepository, PostgresUserRepository,
};

/// Create the application state with all services initialized
///
/// With `database.url` set the services run on PostgreSQL; otherwise they
/// fall back to in-memory repositories, which is enough for development.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let jwt_config = match &config.auth.jwt_secret {
        Some(secret) => JwtConfig::new(secret, config.auth.token_expiration_hours),
        None => {
            warn!("No auth.jwt_secret configured; using a random secret, tokens will not survive a restart");
            JwtConfig::with_random_secret(config.auth.token_expiration_hours)
        }
    };
    let token_issuer = Arc::new(JwtService::new(jwt_config));

    match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new().connect(url).await?;
            info!("Connected to PostgreSQL");

            let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
            let article_repository = Arc::new(PostgresArticleRepository::new(pool));

            Ok(AppState {
                account_service: Arc::new(AccountService::new(user_repository, hasher)),
                article_service: Arc::new(ArticleService::new(article_repository)),
                token_issuer,
            })
        }
        None => {
            info!("No database.url configured; using in-memory repositories");

            let user_repository = Arc::new(InMemoryUserRepository::new());
            let article_repository = Arc::new(InMemoryArticleRepository::new());

            Ok(AppState {
                account_service: Arc::new(AccountService::new(user_repository, hasher)),
                article_service: Arc::new(ArticleService::new(article_repository)),
                token_issuer,
            })
        }
    }
}
