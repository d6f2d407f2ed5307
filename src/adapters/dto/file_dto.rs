use serde::{Deserialize, Serialize};

use crate::domain::models::{
    deletion::{DeletionOutcome, DeletionReport},
    file::StoredFile,
};

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoredFileResponse {
    pub originalname: String,
    pub filename: String,
    pub path: String,
}

impl From<StoredFile> for StoredFileResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            originalname: file.original_name,
            filename: file.stored_name,
            path: file.relative_path,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadFilesResponse {
    pub message: String,
    pub files: Vec<StoredFileResponse>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DeletionStatus {
    Deleted,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct DeletionResultResponse {
    pub filename: String,
    pub status: DeletionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteFilesResponse {
    pub message: String,
    pub deleted: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub results: Vec<DeletionResultResponse>,
}

impl From<DeletionReport> for DeleteFilesResponse {
    fn from(report: DeletionReport) -> Self {
        let message = if report.is_success() {
            "Files deleted successfully"
        } else {
            "Some files could not be deleted"
        };

        let results = report
            .outcomes
            .into_iter()
            .map(|(filename, outcome)| match outcome {
                DeletionOutcome::Deleted => DeletionResultResponse {
                    filename,
                    status: DeletionStatus::Deleted,
                    error: None,
                },
                DeletionOutcome::Failed(reason) => DeletionResultResponse {
                    filename,
                    status: DeletionStatus::Failed,
                    error: Some(reason),
                },
            })
            .collect();

        Self {
            message: message.to_string(),
            deleted: report.succeeded,
            errors: report.errors,
            results,
        }
    }
}
