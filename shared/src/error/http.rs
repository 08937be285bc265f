//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Integrity failures (missing references, entities in use, duplicate
    /// rows) are client errors and stay on 400.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            // 409 Conflict (store-level constraint, lost check-then-act race)
            Self::ConstraintViolation => StatusCode::CONFLICT,

            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            // 503 Service Unavailable (transient, client can retry)
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::SessionStoreError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/integrity errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_failures_are_bad_request() {
        assert_eq!(ErrorCode::LocationInUse.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::EmployeeIsManager.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::EmployeeNotFound.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::RequiredField.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NoActiveSession.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_and_system_statuses() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::StoreUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::ConstraintViolation.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::SessionStoreError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
