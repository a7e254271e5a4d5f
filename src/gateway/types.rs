//! Gateway response types and error-to-status mapping.
//!
//! Success bodies are the entity itself (`{id, ...fields}`); failures are
//! `{message, error}` where `message` is the stable operation-level
//! description and `error` the underlying detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ServiceError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wire shape of every failure response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                error: error.into(),
            },
        }
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication required", error)
    }

    /// Map a service failure onto a status code, keeping `message` stable
    /// per operation and surfacing the service's detail in `error`.
    pub fn from_service(message: &'static str, err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict | ServiceError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(%err, "{message}");
        }
        Self::new(status, message, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Body of `DELETE /api/products/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedBody {
    pub message: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn service_errors_map_to_expected_status_codes() {
        let cases = [
            (
                ServiceError::invalid_input("quantity must be a positive integer"),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::NotFound("product"), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("product"), StatusCode::FORBIDDEN),
            (ServiceError::Conflict, StatusCode::CONFLICT),
            (
                ServiceError::Store(StoreError::Api {
                    status: 503,
                    message: "over quota".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from_service("Failed", err).status, expected);
        }
    }

    #[test]
    fn error_body_carries_message_and_detail() {
        let err =
            ApiError::from_service("Failed to fetch product", ServiceError::NotFound("product"));
        assert_eq!(err.body.message, "Failed to fetch product");
        assert_eq!(err.body.error, "product not found");
    }
}
