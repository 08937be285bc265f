//! API Response types
//!
//! Every successful mutation answers with
//! ```json
//! { "message": "Location added", "id": 3 }
//! ```
//! i.e. a message plus entity-specific top-level fields.

use serde::Serialize;

/// Success envelope: a message and optional flattened payload
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Human-readable message
    pub message: String,
    /// Entity-specific fields, flattened next to `message`
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a message-only response
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// `{"id": ..}` payload for create endpoints
#[derive(Debug, Clone, Serialize)]
pub struct Created {
    pub id: i64,
}

/// `{"id", "key", "value"}` payload for single-field updates
#[derive(Debug, Clone, Serialize)]
pub struct Updated {
    pub id: i64,
    pub key: &'static str,
    pub value: String,
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_is_flattened() {
        let json = serde_json::to_value(ApiResponse::ok("Location added", Created { id: 3 })).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Location added", "id": 3}));
    }

    #[test]
    fn test_message_only() {
        let json = serde_json::to_value(ApiResponse::message("Successfully logged out")).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Successfully logged out"}));
    }

    #[test]
    fn test_updated_shape() {
        let json = serde_json::to_value(ApiResponse::ok(
            "User updated",
            Updated {
                id: 4,
                key: "phone",
                value: "06-1234".to_string(),
            },
        ))
        .unwrap();
        assert_eq!(json["key"], "phone");
        assert_eq!(json["value"], "06-1234");
        assert_eq!(json["id"], 4);
    }
}
