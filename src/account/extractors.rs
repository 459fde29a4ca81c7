use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{account::jwt::JwtKeys, error::ApiError};

/// Extracts and verifies the bearer token, yielding the claimed user id.
/// Every verification failure collapses into the same "Invalid token"
/// rejection so callers learn nothing about which check failed.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Token is required".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("token verification failed");
            ApiError::Auth("Invalid token".to_string())
        })?;

        Ok(AuthUser(claims.sub))
    }
}
