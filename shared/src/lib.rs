//! Shared types for the HR service
//!
//! Domain models for the Location → Department → Employee graph, the
//! unified error type and the success envelope used by every endpoint.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;
