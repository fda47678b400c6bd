use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;
use service::user::errors::AuthError;

/// Error response rendered as `{"error": title, "message": detail}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self { status, title, detail: detail.into() }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, "bad_request", detail) }

    fn internal(detail: String) -> Self {
        error!(error = %detail, "internal error");
        // store details stay in the log
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.title, "message": self.detail}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "validation_failed", msg)
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not_found", msg),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "validation_failed", msg),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, "not_found", e.to_string()),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "conflict", e.to_string()),
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string())
            }
            AuthError::HashError(_) | AuthError::Repository(_) => Self::internal(format!("[{}] {}", e.code(), e)),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
