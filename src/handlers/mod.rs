pub mod auth;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// JSON body extractor that routes rejections through the error translator,
/// so a syntactically malformed body or a missing `application/json`
/// content-type still gets the standard failure envelope instead of axum's
/// plain-text rejection.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {}", e)))?;
        Ok(ApiJson(value))
    }
}

/// Typed parse of a JSON body. Rejects missing, extra, or malformed fields
/// before any store call is made.
pub(crate) fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(format!("invalid request body: {}", e)))
}

/// Parse a path id; a malformed id is a client error, not a 404.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid user id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUserRequest;
    use serde_json::json;

    #[test]
    fn parse_payload_reports_field_errors() {
        let err =
            parse_payload::<CreateUserRequest>(json!({"email": "b@x.com"})).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("4a3a4b1e-5f7e-4a5e-9d9f-0a1b2c3d4e5f").is_ok());
    }
}
