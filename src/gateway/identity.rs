//! Caller identity
//!
//! Full credential auth is out of scope; the caller principal arrives as an
//! `X-User-Id` header, the explicit stand-in for a session layer. Mutating
//! handlers take [`Identity`] as an extractor, so a request without the
//! header is rejected with 401 before the handler runs. Ownership decisions
//! belong to the services, which receive the extracted user id.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::types::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated principal for this request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::unauthorized("missing X-User-Id header"))?;

        Ok(Self {
            user_id: user_id.to_string(),
        })
    }
}
