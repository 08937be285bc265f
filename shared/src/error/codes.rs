//! Unified error codes for the HR service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Location errors
//! - 4xxx: Department errors
//! - 5xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are `u16` on the wire so clients can branch on them without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// A field failed a syntactic rule
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Request body is not valid JSON for the target schema
    InvalidJson = 6,
    /// Path id is not numeric
    InvalidId = 7,
    /// Required field missing
    RequiredField = 8,
    /// Partial update carried no field
    NothingToUpdate = 9,
    /// Client exceeded the request budget
    TooManyRequests = 10,

    // ==================== 1xxx: Auth ====================
    /// No valid session
    NotAuthenticated = 1001,
    /// Unknown identity, wrong credential or login disabled
    InvalidCredentials = 1002,
    /// Logout without a session
    NoActiveSession = 1004,

    // ==================== 3xxx: Location ====================
    LocationNotFound = 3001,
    LocationExists = 3002,
    LocationInUse = 3003,

    // ==================== 4xxx: Department ====================
    DepartmentNotFound = 4001,
    DepartmentHasEmployees = 4002,

    // ==================== 5xxx: Employee ====================
    EmployeeNotFound = 5001,
    EmailExists = 5002,
    EmployeeIsManager = 5003,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    /// Store unreachable (pool timeout, I/O failure)
    StoreUnavailable = 9003,
    /// Unique or foreign key constraint raised by the store itself
    ConstraintViolation = 9004,
    /// Session could not be persisted or removed
    SessionStoreError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "OK",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidJson => "Please provide a valid JSON",
            ErrorCode::InvalidId => "ID must be a number",
            ErrorCode::RequiredField => "please provide all required fields",
            ErrorCode::NothingToUpdate => "please provide a value to update",
            ErrorCode::TooManyRequests => "Too many login attempts, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized",
            ErrorCode::InvalidCredentials => "Invalid login credentials",
            ErrorCode::NoActiveSession => "Invalid session token",

            // Location
            ErrorCode::LocationNotFound => "Location not found",
            ErrorCode::LocationExists => "Location already exists",
            ErrorCode::LocationInUse => "Location is used in a department",

            // Department
            ErrorCode::DepartmentNotFound => "Department not found",
            ErrorCode::DepartmentHasEmployees => "Department has employees",

            // Employee
            ErrorCode::EmployeeNotFound => "User not found",
            ErrorCode::EmailExists => "email already exists",
            ErrorCode::EmployeeIsManager => "User is a manager",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StoreUnavailable => "Store is unavailable",
            ErrorCode::ConstraintViolation => "Conflicting change rejected by the store",
            ErrorCode::SessionStoreError => "Failed to save session",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidJson),
            7 => Ok(ErrorCode::InvalidId),
            8 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::NothingToUpdate),
            10 => Ok(ErrorCode::TooManyRequests),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::NoActiveSession),

            // Location
            3001 => Ok(ErrorCode::LocationNotFound),
            3002 => Ok(ErrorCode::LocationExists),
            3003 => Ok(ErrorCode::LocationInUse),

            // Department
            4001 => Ok(ErrorCode::DepartmentNotFound),
            4002 => Ok(ErrorCode::DepartmentHasEmployees),

            // Employee
            5001 => Ok(ErrorCode::EmployeeNotFound),
            5002 => Ok(ErrorCode::EmailExists),
            5003 => Ok(ErrorCode::EmployeeIsManager),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::StoreUnavailable),
            9004 => Ok(ErrorCode::ConstraintViolation),
            9005 => Ok(ErrorCode::SessionStoreError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InvalidJson.code(), 6);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::LocationInUse.code(), 3003);
        assert_eq!(ErrorCode::DepartmentHasEmployees.code(), 4002);
        assert_eq!(ErrorCode::EmployeeIsManager.code(), 5003);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9003);
    }

    #[test]
    fn test_try_from_roundtrips_known_codes() {
        for code in [
            ErrorCode::RequiredField,
            ErrorCode::InvalidCredentials,
            ErrorCode::LocationExists,
            ErrorCode::DepartmentNotFound,
            ErrorCode::EmailExists,
            ErrorCode::ConstraintViolation,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(1003), Err(InvalidErrorCode(1003)));
    }

    #[test]
    fn test_observed_messages() {
        assert_eq!(
            ErrorCode::RequiredField.message(),
            "please provide all required fields"
        );
        assert_eq!(
            ErrorCode::LocationInUse.message(),
            "Location is used in a department"
        );
        assert_eq!(
            ErrorCode::NothingToUpdate.message(),
            "please provide a value to update"
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::EmailExists).unwrap();
        assert_eq!(json, "5002");
        let code: ErrorCode = serde_json::from_str("1004").unwrap();
        assert_eq!(code, ErrorCode::NoActiveSession);
    }
}
