//! Durable storage: two independently keyed JSON records, the task list and
//! the session. Every save rewrites the whole record; loads are verbatim
//! round-trips of what was written.

use std::fs;
use std::path::Path;

use crate::core::session::Session;
use crate::core::task::Task;
use crate::error::StorageError;

pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StorageError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(tasks)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn load_session(path: &Path) -> Result<Session, StorageError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_session(path: &Path, session: &Session) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(session)?;
    fs::write(path, raw)?;
    Ok(())
}

/// Remove the persisted session record. Missing file is fine.
pub fn clear_session(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
