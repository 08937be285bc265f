//! Entity repository
//!
//! One repository trait per entity, implemented by [`PgStore`] (production)
//! and [`MemoryStore`] (development and tests). Both backends enforce the
//! unique email index and the foreign keys; the guard layer only pre-checks.

pub mod department;
pub mod employee;
pub mod location;
pub mod memory;
pub mod seed;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use location::LocationRepository;
pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::Config;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// Connection could not be obtained or was lost
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Unique or foreign key constraint rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => RepoError::Unavailable(err.to_string()),
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.is_foreign_key_violation() =>
            {
                RepoError::Constraint(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// The complete entity store
#[async_trait]
pub trait Store: LocationRepository + DepartmentRepository + EmployeeRepository {
    /// Liveness probe
    async fn ping(&self) -> RepoResult<()>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Delay before retry number `attempt` (1-based): doubles from `base`, capped at 60s
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_BACKOFF)
}

/// Open the connection pool, retrying with bounded exponential backoff
pub async fn connect_with_backoff(config: &Config, url: &str) -> RepoResult<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .max_lifetime(config.db_max_lifetime)
        .idle_timeout(config.db_max_lifetime);

    let mut attempt = 1;
    loop {
        match options.clone().connect(url).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to store");
                return Ok(pool);
            }
            Err(e) if attempt < config.db_connect_max_attempts => {
                let delay = backoff_delay(config.db_connect_retry, attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = config.db_connect_max_attempts,
                    "Store not reachable ({e}), retrying in {}s",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempt, "Giving up on store connection: {e}");
                return Err(e.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let base = Duration::from_secs(5);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(5));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(10));
        assert_eq!(backoff_delay(base, 4), Duration::from_secs(40));
        assert_eq!(backoff_delay(base, 5), MAX_BACKOFF);
        assert_eq!(backoff_delay(base, 40), MAX_BACKOFF);
    }

    #[tokio::test]
    async fn test_pg_store_unreachable_is_unavailable() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://hr@127.0.0.1:1/hr")
            .unwrap();
        let store: std::sync::Arc<dyn Store> = std::sync::Arc::new(PgStore::new(pool));

        assert!(matches!(store.ping().await, Err(RepoError::Unavailable(_))));
        assert!(matches!(
            store.find_location(1).await,
            Err(RepoError::Unavailable(_))
        ));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err: RepoError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, RepoError::Unavailable(_)));
        let err: RepoError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
