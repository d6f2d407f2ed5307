use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StorageDirectory, StoredFile},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Ensure the directory for an already normalized logical subpath exists.
    async fn resolve_directory(
        &self,
        normalized_path: &str,
    ) -> Result<StorageDirectory, ApplicationError>;

    /// Write one file into `directory` under a freshly derived name.
    async fn store(
        &self,
        directory: &StorageDirectory,
        file_data: FileData,
    ) -> Result<StoredFile, ApplicationError>;

    /// Remove a file given by its path relative to the upload root.
    async fn delete(&self, relative_path: &str) -> Result<(), ApplicationError>;

    /// Whether the upload root is currently usable.
    async fn is_available(&self) -> bool;
}
