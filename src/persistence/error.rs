use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} {id} does not exist")]
    MissingRow { entity: &'static str, id: i32 },

    #[error("Duplicate {0}")]
    Duplicate(String),
}

impl StorageError {
    /// Map unique-constraint violations to [`StorageError::Duplicate`].
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::Duplicate(what.to_string())
            }
            _ => StorageError::Database(err),
        }
    }
}
