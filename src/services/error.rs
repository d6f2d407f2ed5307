use thiserror::Error;

use crate::application::error::ApplicationError;

/// Messages never contain absolute server paths; they are shown to clients.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path")]
    InvalidPath,

    #[error("Path escapes the upload root")]
    PathEscape,

    #[error("File not found")]
    NotFound,

    #[error("Not a regular file")]
    NotAFile,

    #[error("Failed to create directory: {0}")]
    DirectoryCreation(String),

    #[error("Failed to write file: {0}")]
    Write(String),

    #[error("Failed to delete file: {0}")]
    Unlink(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => ApplicationError::NotFound(error.to_string()),
            StorageError::InvalidPath | StorageError::PathEscape | StorageError::NotAFile => {
                ApplicationError::BadRequest(error.to_string())
            }
            StorageError::DirectoryCreation(_)
            | StorageError::Write(_)
            | StorageError::Unlink(_) => ApplicationError::InternalError(error.to_string()),
        }
    }
}
