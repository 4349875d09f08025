//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its mapping
//! onto `{"detail": ...}` HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use masal_core::{PortError, ServiceError};
use serde_json::json;
use tracing::error;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A user-facing failure raised by one of the core services.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::Service(ServiceError::Validation(msg.into()))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Service(ServiceError::Auth(msg.into()))
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Service(ServiceError::Forbidden(msg.into()))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::Service(ServiceError::NotFound(msg.into()))
    }

    /// The HTTP status and client-facing message for this error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        const INTERNAL: &str = "Sunucu hatası oluştu";
        match self {
            ApiError::Service(err) => {
                let status = match err {
                    ServiceError::Validation(_) | ServiceError::Moderation(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    ServiceError::Auth(_) => StatusCode::UNAUTHORIZED,
                    ServiceError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
                    ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                    ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                    ServiceError::Provider(_)
                    | ServiceError::ProviderUnavailable(_)
                    | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let detail = match err {
                    ServiceError::Internal(_) => INTERNAL.to_string(),
                    other => other.to_string(),
                };
                (status, detail)
            }
            ApiError::Port(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Port(PortError::Conflict(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Port(PortError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "Oturum geçersiz".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
