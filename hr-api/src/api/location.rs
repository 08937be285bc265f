//! Location endpoints

use axum::Json;
use axum::extract::State;
use shared::ApiResponse;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Location, LocationCreate, LocationUpdate};
use shared::response::{Created, Updated};

use super::extract::{EntityId, ValidJson};
use crate::guard::IntegrityGuard;
use crate::state::AppState;

/// GET /api/v1/location
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    Ok(Json(state.store.list_locations().await?))
}

/// GET /api/v1/location/{id}
pub async fn get_location(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Location>> {
    state
        .store
        .find_location(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::LocationNotFound))
}

/// POST /api/v1/location
pub async fn create_location(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LocationCreate>,
) -> AppResult<ApiResponse<Created>> {
    let id = IntegrityGuard::new(state.store.as_ref())
        .create_location(&payload)
        .await?;
    Ok(ApiResponse::ok("Location added", Created { id }))
}

/// PUT /api/v1/location/{id}
pub async fn update_location(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(payload): ValidJson<LocationUpdate>,
) -> AppResult<ApiResponse<Updated>> {
    let field = IntegrityGuard::new(state.store.as_ref())
        .update_location(id, &payload)
        .await?;
    Ok(ApiResponse::ok(
        "Location updated",
        Updated {
            id,
            key: field.column(),
            value: field.value().to_string(),
        },
    ))
}

/// DELETE /api/v1/location/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<Created>> {
    IntegrityGuard::new(state.store.as_ref())
        .delete_location(id)
        .await?;
    Ok(ApiResponse::ok("Location is deleted", Created { id }))
}
