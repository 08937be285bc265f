//! Extractors that reject with the unified `{"message"}` envelope

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use http::request::Parts;
use shared::error::{AppError, ErrorCode};

use crate::validation;

/// JSON body; any parse or content-type failure becomes `Please provide a valid JSON`
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Cannot bind JSON");
                Err(AppError::new(ErrorCode::InvalidJson))
            }
        }
    }
}

/// Numeric `{id}` path segment
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::new(ErrorCode::InvalidId))?;
        Ok(Self(validation::parse_id(&raw)?))
    }
}
