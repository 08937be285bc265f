//! Login, logout and profile

use axum::extract::{FromRequest, Request, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Form, Json};
use chrono::Utc;
use http::HeaderMap;
use http::header::SET_COOKIE;
use serde::Deserialize;
use shared::ApiResponse;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Profile;

use crate::auth::cookie::{clear_session_cookie, session_token, set_session_cookie};
use crate::auth::hasher::hash_credential;
use crate::auth::rate_limit::extract_ip;
use crate::auth::session::SessionIdentity;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginForm {
    username: String,
    password: String,
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `username`/`password` headers, falling back to form fields when either is empty
async fn read_credentials(req: Request) -> (String, String) {
    let username = header(req.headers(), "username");
    let password = header(req.headers(), "password");
    if !username.is_empty() && !password.is_empty() {
        return (username, password);
    }
    let form = Form::<LoginForm>::from_request(req, &())
        .await
        .map(|Form(f)| f)
        .unwrap_or_default();
    (form.username, form.password)
}

/// POST /login
pub async fn login(State(state): State<AppState>, req: Request) -> AppResult<Response> {
    if let Some(token) = session_token(req.headers())
        && state.sessions.resolve(&token).await?.is_some()
    {
        return Ok(ApiResponse::message("User is already authenticated").into_response());
    }

    let ip = extract_ip(&req);
    let (username, password) = read_credentials(req).await;
    let username = state.config.normalize_login(&username);
    tracing::info!(user = %username, ip = %ip, "Login attempt");

    let Some(credentials) = state.store.find_credentials(&username).await? else {
        tracing::warn!(user = %username, ip = %ip, "Login failed: unknown identity");
        return Err(AppError::invalid_credentials());
    };
    if password.is_empty() || hash_credential(&password) != credentials.password_hash {
        tracing::warn!(user = %username, ip = %ip, "Login failed: credential mismatch");
        return Err(AppError::invalid_credentials());
    }
    if !credentials.can_login {
        tracing::warn!(user = %username, ip = %ip, "Login failed: login disabled for account");
        return Err(AppError::invalid_credentials());
    }

    state
        .store
        .record_login(credentials.id, Utc::now())
        .await?;
    let session = state
        .sessions
        .create(SessionIdentity {
            employee_id: credentials.id,
            email: credentials.email,
        })
        .await?;
    let cookie = set_session_cookie(&session.token).map_err(|e| {
        tracing::error!(error = %e, "Cannot build session cookie");
        AppError::new(ErrorCode::SessionStoreError)
    })?;

    tracing::info!(user = %username, ip = %ip, "Login succeeded");
    Ok((
        [(SET_COOKIE, cookie)],
        ApiResponse::message("Successfully authenticated user"),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let Some(token) = session_token(&headers) else {
        return Err(AppError::new(ErrorCode::NoActiveSession));
    };
    if !state.sessions.revoke(&token).await? {
        return Err(AppError::new(ErrorCode::NoActiveSession));
    }
    tracing::info!("Session closed");
    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        ApiResponse::message("Successfully logged out"),
    )
        .into_response())
}

/// GET /api/v1/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> AppResult<Json<Profile>> {
    let profile = state
        .store
        .find_profile(identity.employee_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(Json(profile))
}
