//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// State backed by in-memory repositories.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::with_repositories(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            jwt,
        )
    }

    pub fn with_repositories(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            posts,
            users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// Build the application state with appropriate implementations.
    #[cfg(feature = "postgres")]
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        use anyhow::Context;
        use quill_infra::{PostgresPostRepository, PostgresUserRepository, database};

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(config.jwt.clone()));
        };

        let conn = database::connect(db_config)
            .await
            .context("failed to connect to database")?;

        tracing::info!("Application state initialized (postgres)");

        Ok(Self::with_repositories(
            Arc::new(PostgresPostRepository::new(conn.clone())),
            Arc::new(PostgresUserRepository::new(conn)),
            config.jwt.clone(),
        ))
    }

    /// Build the application state with appropriate implementations.
    #[cfg(not(feature = "postgres"))]
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature.");
        }
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Ok(Self::in_memory(config.jwt.clone()))
    }
}
