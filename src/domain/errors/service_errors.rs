use super::ValidationError;

/// Errors surfaced by the validated services and the storage ports
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// A business-unique key is already owned by another record
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Only raised by caller-side glue; lookups themselves return `None`
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Persistence failure passed through from an adapter
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        detail: Option<String>,
    },
}

impl ServiceError {
    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ServiceError::Storage {
            message: message.into(),
            detail: Some(err.to_string()),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict { .. })
    }
}

/// Result type for service and storage operations
pub type ServiceResult<T> = Result<T, ServiceError>;
