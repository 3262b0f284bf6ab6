use thiserror::Error;
use uuid::Uuid;

use models::errors::ModelError;

/// Errors raised by the license, fine and payment services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Caller does not own the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(message: &str) -> Self { Self::NotFound(message.to_string()) }

    /// Message safe to show to API callers.
    pub fn public_message(&self) -> &str {
        match self {
            ServiceError::Validation(m)
            | ServiceError::Forbidden(m)
            | ServiceError::NotFound(m)
            | ServiceError::Conflict(m) => m,
            ServiceError::Db(_) => "Server error",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ModelError::from(e).into() }
}

/// Ownership check shared by every resource service.
pub fn ensure_owner(owner: Uuid, requester: Uuid, action: &str) -> Result<(), ServiceError> {
    if owner != requester {
        return Err(ServiceError::Forbidden(format!("Not authorized to {action}")));
    }
    Ok(())
}
