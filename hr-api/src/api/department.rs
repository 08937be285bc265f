//! Department endpoints

use axum::Json;
use axum::extract::State;
use serde_json::json;
use shared::ApiResponse;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DepartmentCreate, DepartmentUpdate, DepartmentView};
use shared::response::{Created, Updated};

use super::extract::{EntityId, ValidJson};
use crate::guard::IntegrityGuard;
use crate::state::AppState;

/// GET /api/v1/department
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentView>>> {
    Ok(Json(state.store.list_departments().await?))
}

/// GET /api/v1/department/{id}
pub async fn get_department(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<DepartmentView>> {
    state
        .store
        .find_department(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))
}

/// POST /api/v1/department
pub async fn create_department(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<DepartmentCreate>,
) -> AppResult<ApiResponse<Created>> {
    let id = IntegrityGuard::new(state.store.as_ref())
        .create_department(&payload)
        .await?;
    Ok(ApiResponse::ok("Department added", Created { id }))
}

/// PUT /api/v1/department/{id}
pub async fn update_department(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(payload): ValidJson<DepartmentUpdate>,
) -> AppResult<ApiResponse<Updated>> {
    let field = IntegrityGuard::new(state.store.as_ref())
        .update_department(id, &payload)
        .await?;
    Ok(ApiResponse::ok(
        "Department updated",
        Updated {
            id,
            key: field.column(),
            value: field.value(),
        },
    ))
}

/// DELETE /api/v1/department/{id}
pub async fn delete_department(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let department = IntegrityGuard::new(state.store.as_ref())
        .delete_department(id)
        .await?;
    Ok(ApiResponse::ok(
        "Department deleted",
        json!({ "department": department }),
    ))
}
