//! Server-side sessions
//!
//! A session maps an opaque token to the authenticated employee and has a
//! fixed absolute expiry of one hour. Access never extends it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sqlx::PgPool;
use thiserror::Error;

pub const SESSION_TTL_SECS: i64 = 3600;

/// Authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub employee_id: i64,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub identity: SessionIdentity,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn issue(identity: SessionIdentity) -> Self {
        Self {
            token: generate_token(),
            identity,
            expires_at: Utc::now() + Duration::seconds(SESSION_TTL_SECS),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    Store(String),
}

impl From<sqlx::Error> for SessionError {
    fn from(err: sqlx::Error) -> Self {
        SessionError::Store(err.to_string())
    }
}

/// 32 random bytes, hex encoded
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
    hex::encode(bytes)
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a new session for the identity
    async fn create(&self, identity: SessionIdentity) -> Result<Session, SessionError>;
    /// Identity behind a live token; expired entries are dropped
    async fn resolve(&self, token: &str) -> Result<Option<SessionIdentity>, SessionError>;
    /// Remove the session; `false` when it did not exist
    async fn revoke(&self, token: &str) -> Result<bool, SessionError>;
    /// Remove all expired sessions, returning how many were dropped
    async fn purge_expired(&self) -> Result<u64, SessionError>;
}

/// Process-local session store
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, identity: SessionIdentity) -> Result<Session, SessionError> {
        let session = Session::issue(identity);
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn resolve(&self, token: &str) -> Result<Option<SessionIdentity>, SessionError> {
        let now = Utc::now();
        let expired = match self.sessions.get(token) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.identity.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove_if(token, |_, s| s.expires_at <= now);
        }
        Ok(None)
    }

    async fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.remove(token).is_some())
    }

    async fn purge_expired(&self) -> Result<u64, SessionError> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.expires_at > now);
        Ok(before.saturating_sub(self.sessions.len()) as u64)
    }
}

/// Sessions persisted in the `sessions` table
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, identity: SessionIdentity) -> Result<Session, SessionError> {
        let session = Session::issue(identity);
        sqlx::query(
            "INSERT INTO sessions (token, employee_id, email, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.token)
        .bind(session.identity.employee_id)
        .bind(&session.identity.email)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(session)
    }

    async fn resolve(&self, token: &str) -> Result<Option<SessionIdentity>, SessionError> {
        let row: Option<(i64, String, DateTime<Utc>)> =
            sqlx::query_as("SELECT employee_id, email, expires_at FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((employee_id, email, expires_at)) if expires_at > Utc::now() => {
                Ok(Some(SessionIdentity { employee_id, email }))
            }
            Some(_) => {
                sqlx::query("DELETE FROM sessions WHERE token = $1 AND expires_at <= NOW()")
                    .bind(token)
                    .execute(&self.pool)
                    .await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
