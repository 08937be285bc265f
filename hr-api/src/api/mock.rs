//! Demo data endpoint

use axum::Extension;
use axum::extract::State;
use shared::ApiResponse;

use crate::auth::SessionIdentity;
use crate::db::seed::{MockSummary, seed_mock_data};
use crate::state::AppState;

/// GET /api/v1/mockData
///
/// Departments are managed by the calling user.
pub async fn mock_data(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResponse<MockSummary> {
    let summary = seed_mock_data(
        state.store.as_ref(),
        identity.employee_id,
        &state.default_password_hash,
        &state.config.email_domain,
    )
    .await;
    tracing::info!(
        user = %identity.email,
        locations = summary.locations,
        departments = summary.departments,
        employees = summary.employees,
        "Mock data seeded"
    );
    ApiResponse::ok("Mock data added", summary)
}
