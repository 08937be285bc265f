//! Employee endpoints

use axum::Json;
use axum::extract::State;
use serde_json::json;
use shared::ApiResponse;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{EmployeeCreate, EmployeeUpdate, EmployeeView};
use shared::response::{Created, Updated};

use super::extract::{EntityId, ValidJson};
use crate::guard::IntegrityGuard;
use crate::state::AppState;

/// GET /api/v1/employee
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<EmployeeView>>> {
    Ok(Json(state.store.list_employees().await?))
}

/// GET /api/v1/employee/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<EmployeeView>> {
    state
        .store
        .find_employee(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))
}

/// POST /api/v1/employee
pub async fn create_employee(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<EmployeeCreate>,
) -> AppResult<ApiResponse<Created>> {
    let id = IntegrityGuard::new(state.store.as_ref())
        .create_employee(&payload, &state.default_password_hash)
        .await?;
    Ok(ApiResponse::ok("User added", Created { id }))
}

/// PUT /api/v1/employee/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(payload): ValidJson<EmployeeUpdate>,
) -> AppResult<ApiResponse<Updated>> {
    let field = IntegrityGuard::new(state.store.as_ref())
        .update_employee(id, &payload)
        .await?;
    Ok(ApiResponse::ok(
        "User updated",
        Updated {
            id,
            key: field.column(),
            value: field.value(),
        },
    ))
}

/// DELETE /api/v1/employee/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let employee = IntegrityGuard::new(state.store.as_ref())
        .delete_employee(id)
        .await?;
    Ok(ApiResponse::ok("User deleted", json!({ "employee": employee })))
}
