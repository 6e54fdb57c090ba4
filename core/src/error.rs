use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Rejected user input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("Task with ID {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine home directory")]
    HomeDirUnavailable,
}

impl TaskError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
