use std::path::PathBuf;

/// One file part taken from an upload request.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub original_name: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, original_name: String) -> Self {
        Self {
            content,
            original_name,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// A directory under the upload root that is ready to receive files.
#[derive(Debug, Clone)]
pub struct StorageDirectory {
    pub absolute: PathBuf,
    /// `/`-separated path below the upload root; empty for the root itself.
    pub relative: String,
}

impl StorageDirectory {
    pub fn relative_path_of(&self, stored_name: &str) -> String {
        if self.relative.is_empty() {
            stored_name.to_string()
        } else {
            format!("{}/{}", self.relative, stored_name)
        }
    }
}

/// Result of storing one uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub original_name: String,
    pub stored_name: String,
    pub relative_path: String,
}
