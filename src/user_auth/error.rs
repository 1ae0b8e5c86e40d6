use thiserror::Error;

use crate::gateway::types::ApiError;
use crate::persistence::StorageError;

#[derive(Error, Debug)]
pub enum AuthServiceError {
    #[error("Invalid user name or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("user {0} not found")]
    UserNotFound(i32),

    #[error("role {0} not found")]
    RoleNotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(what) => AuthServiceError::Conflict(what),
            StorageError::MissingRow { entity: "user", id } => AuthServiceError::UserNotFound(id),
            other => AuthServiceError::Storage(other),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            AuthServiceError::InvalidInput(msg) => ApiError::bad_request(msg),
            AuthServiceError::UserNotFound(_) | AuthServiceError::RoleNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            AuthServiceError::Conflict(_) => ApiError::conflict(err.to_string()),
            AuthServiceError::Token(_) | AuthServiceError::Hashing(_) => ApiError::internal(err),
            AuthServiceError::Storage(inner) => ApiError::internal(inner),
        }
    }
}
