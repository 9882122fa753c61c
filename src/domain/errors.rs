use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unexpected database error: {0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn conflict(message: impl Into<String>) -> Self {
        RepositoryError::Conflict(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        RepositoryError::Unexpected(message.into())
    }
}
