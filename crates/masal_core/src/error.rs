//! crates/masal_core/src/error.rs
//!
//! Errors raised by the core services. Each variant maps to one HTTP status
//! in the API layer; messages are user-facing.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    PaymentRequired(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Local word filter or remote moderation rejected the content.
    #[error("{0}")]
    Moderation(String),
    #[error("{0}")]
    Provider(String),
    #[error("{0}")]
    ProviderUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<PortError> for ServiceError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound(msg) => ServiceError::NotFound(msg),
            PortError::Conflict(msg) => ServiceError::Validation(msg),
            PortError::Unauthorized => ServiceError::Auth("Oturum geçersiz".to_string()),
            PortError::QuotaExceeded(msg) => ServiceError::Provider(msg),
            PortError::Unavailable(msg) => ServiceError::ProviderUnavailable(msg),
            PortError::Unexpected(msg) => ServiceError::Internal(msg),
        }
    }
}
