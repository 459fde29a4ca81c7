use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::account::repo::StoreError;

/// Error taxonomy for the HTTP surface. Login and token failures stay
/// deliberately vague so callers cannot enumerate accounts.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Auth(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicatePhone | StoreError::DuplicateEmail => {
                ApiError::Conflict(e.to_string())
            }
            StoreError::Database(e) => ApiError::Internal(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_conflict_map_to_400() {
        let resp = ApiError::Validation("phone is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError::Conflict("Email already registered".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_maps_to_401() {
        let resp = ApiError::Auth("Invalid token".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn duplicate_store_errors_become_conflicts() {
        let err: ApiError = StoreError::DuplicatePhone.into();
        match err {
            ApiError::Conflict(msg) => assert_eq!(msg, "Phone number already registered"),
            other => panic!("expected conflict, got {other:?}"),
        }
        let err: ApiError = StoreError::DuplicateEmail.into();
        match err {
            ApiError::Conflict(msg) => assert_eq!(msg, "Email already registered"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
