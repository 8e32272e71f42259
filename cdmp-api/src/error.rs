//! HTTP error responses

use crate::api::schema::SchemaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cdmp_common::api::{ApiAuthError, ErrorResponse, MessageResponse};
use thiserror::Error;
use tracing::error;

/// Errors a handler or the auth layer can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request did not match the route's schema
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Missing, malformed or unknown bearer token
    #[error("{0}")]
    Unauthorized(ApiAuthError),

    /// A requested id does not exist; the message goes to the client verbatim
    #[error("{0}")]
    NotFound(String),

    /// Document store failure
    #[error("Document store error: {0}")]
    Store(#[from] cdmp_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(ApiAuthError::DatabaseError(e)) => {
                error!("Token lookup failed: {}", e);
                internal_error()
            }
            ApiError::Schema(e @ SchemaError::WrongMethod { .. }) => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response(),
            ApiError::Schema(e) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response(),
            ApiError::Unauthorized(e) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(message))).into_response()
            }
            ApiError::Store(e) => {
                error!("Document store error: {}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
