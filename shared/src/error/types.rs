//! Error type and its HTTP rendering

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Application error with structured error code and details
///
/// Rendered as `{"message": ..., <details>...}`. The same envelope is used
/// for malformed requests, validator failures, integrity failures and
/// authentication failures.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Extra top-level fields (e.g. the snapshot of a row that blocked a delete)
    pub details: Option<Map<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an unauthorized error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Render the JSON body
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(self.message.clone()));
        if let Some(details) = &self.details {
            for (k, v) in details {
                body.insert(k.clone(), v.clone());
            }
        }
        Value::Object(body)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::DepartmentNotFound);
        assert_eq!(err.code, ErrorCode::DepartmentNotFound);
        assert_eq!(err.message, "Department not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::DepartmentNotFound, "department does not exist");
        assert_eq!(err.code, ErrorCode::DepartmentNotFound);
        assert_eq!(err.message, "department does not exist");
    }

    #[test]
    fn test_body_flattens_details() {
        let err = AppError::new(ErrorCode::EmployeeIsManager)
            .with_detail("employee", serde_json::json!({"id": 7}));
        let body = err.body();
        assert_eq!(body["message"], "User is a manager");
        assert_eq!(body["employee"]["id"], 7);
    }

    #[test]
    fn test_body_is_message_only_without_details() {
        let body = AppError::new(ErrorCode::LocationInUse).body();
        assert_eq!(
            body,
            serde_json::json!({"message": "Location is used in a department"})
        );
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::unauthorized().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::validation("name is too long").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::EmployeeNotFound, "User not found");
        assert_eq!(format!("{}", err), "User not found");
    }
}
