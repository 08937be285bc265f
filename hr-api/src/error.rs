//! Conversions from infrastructure errors into `AppError`
//!
//! Lets handlers and guards use `?` on repository and session calls. The
//! underlying cause is logged here because `AppError` only carries the
//! client-facing message.

use shared::error::{AppError, ErrorCode};

use crate::auth::session::SessionError;
use crate::db::RepoError;

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Unavailable(cause) => {
                tracing::error!(error = %cause, "Store unavailable");
                AppError::new(ErrorCode::StoreUnavailable)
            }
            RepoError::Constraint(cause) => {
                tracing::warn!(error = %cause, "Store rejected write");
                AppError::new(ErrorCode::ConstraintViolation)
            }
            RepoError::Database(cause) => {
                tracing::error!(error = %cause, "Store error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        tracing::error!(error = %e, "Session store error");
        AppError::new(ErrorCode::SessionStoreError)
    }
}
