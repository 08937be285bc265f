//! Health check endpoint

use axum::Json;
use axum::extract::State;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::state::AppState;

/// 200 with the service version when the store answers a ping, else 500
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    if let Err(e) = state.store.ping().await {
        tracing::error!(error = %e, "Health check failed");
        return Err(AppError::with_message(
            ErrorCode::DatabaseError,
            "Database is not reachable",
        ));
    }
    Ok(Json(serde_json::json!({
        "message": "OK",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
