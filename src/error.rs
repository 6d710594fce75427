use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("moving folder {folder} under {target} would create a cycle")]
    Cycle { folder: Uuid, target: Uuid },

    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// True for the one failure class that leaves live state ahead of
    /// durable state: the mutation applied but the snapshot write failed.
    pub fn is_persistence(&self) -> bool {
        matches!(self, TaskError::Persistence(_))
    }
}
