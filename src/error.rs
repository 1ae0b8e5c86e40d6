use thiserror::Error;

use crate::persistence::StorageError;

/// Failure of an application-service operation
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0} already exists")]
    Conflict(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::MissingRow { entity, id } => ServiceError::NotFound { entity, id },
            StorageError::Duplicate(what) => ServiceError::Conflict(what),
            other => ServiceError::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
