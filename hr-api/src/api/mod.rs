//! API routes for hr-api

pub mod auth;
pub mod department;
pub mod employee;
pub mod extract;
pub mod health;
pub mod location;
pub mod mock;

use crate::auth::middleware::require_session;
use crate::auth::rate_limit::login_rate_limit;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Login (rate limited per client IP)
    let login = Router::new()
        .route("/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Everything under /api/v1 requires a live session
    let protected = Router::new()
        .route("/api/v1/me", get(auth::me))
        .route(
            "/api/v1/employee",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route(
            "/api/v1/employee/{id}",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route(
            "/api/v1/department",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/api/v1/department/{id}",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .route(
            "/api/v1/location",
            get(location::list_locations).post(location::create_location),
        )
        .route(
            "/api/v1/location/{id}",
            get(location::get_location)
                .put(location::update_location)
                .delete(location::delete_location),
        )
        .route("/api/v1/mockData", get(mock::mock_data))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/healthcheck", get(health::health_check))
        .route("/logout", get(auth::logout))
        .merge(login)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
