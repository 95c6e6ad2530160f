use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use srefi_core::SrefiError;
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    Conflict(String),
    NotFound(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<SrefiError> for ApiError {
    fn from(err: SrefiError) -> Self {
        match err {
            SrefiError::Auth(msg) => ApiError::Unauthorized(msg),
            SrefiError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            SrefiError::InvalidInput(msg) => ApiError::BadRequest(msg),
            SrefiError::Conflict(msg) => ApiError::Conflict(msg),
            SrefiError::AlreadySubmitted => ApiError::Conflict(err.to_string()),
            SrefiError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
