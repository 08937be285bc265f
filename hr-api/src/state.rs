//! Application state for hr-api

use std::sync::Arc;

use crate::auth::hasher::hash_credential;
use crate::auth::rate_limit::RateLimiter;
use crate::auth::session::{MemorySessionStore, PgSessionStore, SessionStore};
use crate::config::{Backend, Config, ConfigError};
use crate::db::{self, MemoryStore, PgStore, Store};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Entity store
    pub store: Arc<dyn Store>,
    /// Session store
    pub sessions: Arc<dyn SessionStore>,
    /// Rate limiter for the login route
    pub rate_limiter: RateLimiter,
    /// Digest of the default password given to every new employee
    pub default_password_hash: Arc<str>,
}

impl AppState {
    /// Connect the configured backends, run migrations and bootstrap the default user
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let uses_postgres = config.store_backend == Backend::Postgres
            || config.session_backend == Backend::Postgres;

        let pool = if uses_postgres {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let pool = db::connect_with_backoff(&config, url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");
            Some(pool)
        } else {
            None
        };

        let store: Arc<dyn Store> = match (config.store_backend, &pool) {
            (Backend::Postgres, Some(pool)) => Arc::new(PgStore::new(pool.clone())),
            _ => Arc::new(MemoryStore::new()),
        };
        let sessions: Arc<dyn SessionStore> = match (config.session_backend, &pool) {
            (Backend::Postgres, Some(pool)) => Arc::new(PgSessionStore::new(pool.clone())),
            _ => Arc::new(MemorySessionStore::new()),
        };
        tracing::info!(
            store = ?config.store_backend,
            sessions = ?config.session_backend,
            "Backends ready"
        );

        let state = Self::with_backends(config, store, sessions);
        db::seed::ensure_default_user(
            state.store.as_ref(),
            &state.config.default_user,
            &state.default_password_hash,
        )
        .await?;
        Ok(state)
    }

    pub fn with_backends(
        config: Config,
        store: Arc<dyn Store>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let default_password_hash = hash_credential(&config.default_password).into();
        Self {
            config: Arc::new(config),
            store,
            sessions,
            rate_limiter: RateLimiter::new(),
            default_password_hash,
        }
    }

    /// State on the in-memory backends with nothing seeded
    #[cfg(test)]
    pub fn in_memory(config: Config) -> Self {
        Self::with_backends(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemorySessionStore::new()),
        )
    }
}
