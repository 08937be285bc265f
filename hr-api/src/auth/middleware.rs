//! Session gate for protected routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use super::cookie::session_token;
use crate::state::AppState;

/// Resolve the session cookie and inject [`SessionIdentity`] into the request.
///
/// Runs before any handler work: an absent, unknown or expired token ends
/// the request with 401.
///
/// [`SessionIdentity`]: super::session::SessionIdentity
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session_token(req.headers()) else {
        tracing::debug!(path = %req.uri().path(), "Request without session cookie");
        return Err(AppError::unauthorized());
    };

    let Some(identity) = state.sessions.resolve(&token).await? else {
        tracing::debug!(path = %req.uri().path(), "Unknown or expired session");
        return Err(AppError::unauthorized());
    };

    tracing::info!(
        user = %identity.email,
        path = %req.uri().path(),
        "Authenticated request"
    );
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
