use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
};
use tracing::{debug, error, info, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        models::file::{FileData, StorageDirectory, StoredFile},
        naming::derive_filename,
    },
    services::error::StorageError,
};

/// Upper bound on disambiguated names tried for one file.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Stores uploads on the local filesystem below a single root directory.
pub struct LocalStorageService {
    /// Canonical form of the configured upload root.
    root: PathBuf,
}

impl LocalStorageService {
    /// Create the upload root if needed and pin its canonical path.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();

        fs::create_dir_all(root)
            .await
            .map_err(|e| StorageError::DirectoryCreation(e.to_string()))?;
        let root = fs::canonicalize(root)
            .await
            .map_err(|e| StorageError::DirectoryCreation(e.to_string()))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_contained(&self, candidate: &Path) -> Result<(), StorageError> {
        if candidate.starts_with(&self.root) {
            Ok(())
        } else {
            warn!("Rejected path outside the upload root");
            Err(StorageError::PathEscape)
        }
    }

    /// Turn a caller supplied delete path into a relative path made only of
    /// normal components. A leading `/` is treated as relative to the root.
    fn relative_file_path(path: &str) -> Result<PathBuf, StorageError> {
        let mut relative = PathBuf::new();

        for component in Path::new(path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::PathEscape)
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath);
        }

        Ok(relative)
    }

    /// Create one directory level and confirm it did not lead out of the root.
    async fn enter_directory(&self, parent: &Path, segment: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(StorageError::PathEscape),
        }

        let next = parent.join(segment);
        match fs::create_dir(&next).await {
            Ok(()) => debug!("Created upload directory segment '{}'", segment),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                error!("Cannot create upload directory segment '{}': {}", segment, e);
                return Err(StorageError::DirectoryCreation(e.to_string()));
            }
        }

        let canonical = fs::canonicalize(&next)
            .await
            .map_err(|e| StorageError::DirectoryCreation(e.to_string()))?;
        self.ensure_contained(&canonical)?;

        let metadata = fs::metadata(&canonical)
            .await
            .map_err(|e| StorageError::DirectoryCreation(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(StorageError::DirectoryCreation(format!(
                "'{}' exists and is not a directory",
                segment
            )));
        }

        Ok(canonical)
    }

    async fn write_new_file(mut file: File, content: &[u8]) -> std::io::Result<()> {
        file.write_all(content).await?;
        file.flush().await?;
        file.sync_all().await
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn resolve_directory(
        &self,
        normalized_path: &str,
    ) -> Result<StorageDirectory, ApplicationError> {
        let segments: Vec<&str> = normalized_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut absolute = self.root.clone();
        for segment in &segments {
            absolute = self.enter_directory(&absolute, segment).await?;
        }

        Ok(StorageDirectory {
            absolute,
            relative: segments.join("/"),
        })
    }

    async fn store(
        &self,
        directory: &StorageDirectory,
        file_data: FileData,
    ) -> Result<StoredFile, ApplicationError> {
        self.ensure_contained(&directory.absolute)?;
        let epoch_millis = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let stored_name = derive_filename(&file_data.original_name, epoch_millis, attempt);
            let target = directory.absolute.join(&stored_name);

            let file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Stored name '{}' is taken, trying another", stored_name);
                    continue;
                }
                Err(e) => {
                    error!("Cannot create '{}': {}", stored_name, e);
                    return Err(StorageError::Write(e.to_string()).into());
                }
            };

            if let Err(e) = Self::write_new_file(file, &file_data.content).await {
                error!("Cannot write '{}': {}", stored_name, e);
                if let Err(cleanup) = fs::remove_file(&target).await {
                    warn!("Cannot remove partial file '{}': {}", stored_name, cleanup);
                }
                return Err(StorageError::Write(e.to_string()).into());
            }

            let relative_path = directory.relative_path_of(&stored_name);
            info!(
                "Stored '{}' as '{}' ({} bytes)",
                file_data.original_name,
                relative_path,
                file_data.size()
            );

            return Ok(StoredFile {
                original_name: file_data.original_name,
                stored_name,
                relative_path,
            });
        }

        Err(StorageError::Write("no free filename available".to_string()).into())
    }

    async fn delete(&self, relative_path: &str) -> Result<(), ApplicationError> {
        let relative = Self::relative_file_path(relative_path)?;
        let candidate = self.root.join(&relative);

        let parent = candidate.parent().unwrap_or(&self.root);
        let canonical_parent = match fs::canonicalize(parent).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound.into()),
            Err(e) => return Err(StorageError::Unlink(e.to_string()).into()),
        };
        self.ensure_contained(&canonical_parent)?;

        let metadata = match fs::symlink_metadata(&candidate).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound.into()),
            Err(e) => return Err(StorageError::Unlink(e.to_string()).into()),
        };
        if metadata.is_dir() {
            return Err(StorageError::NotAFile.into());
        }

        match fs::remove_file(&candidate).await {
            Ok(()) => {
                info!("Deleted '{}'", relative.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound.into()),
            Err(e) => {
                error!("Cannot delete '{}': {}", relative.display(), e);
                Err(StorageError::Unlink(e.to_string()).into())
            }
        }
    }

    async fn is_available(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }
}
