use thiserror::Error;
use uuid::Uuid;

/// Failure reading or writing one of the durable records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure from a task-store operation.
///
/// A `Storage` error from a mutation means the in-memory change was applied
/// but could not be written out; in-memory state stays the source of truth
/// for the current session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(Uuid),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
}
