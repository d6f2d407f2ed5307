use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
        Multipart, Query, RawQuery, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};

use crate::{
    adapters::dto::file_dto::{DeleteFilesResponse, UploadFilesResponse, UploadQuery},
    application::{error::ApplicationError, services::StorageService},
    domain::{
        models::{deletion::DeletionReport, file::FileData},
        naming::normalize_path,
    },
};

const FILES_FIELD: &str = "files";
const PATH_FIELD: &str = "path";
const FILENAMES_PARAM: &str = "filenames";
const FILENAMES_LIST_PARAM: &str = "filenames[]";

pub struct FileController;

impl FileController {
    /// POST /upload
    /// Multipart: one or more `files` parts, optional `path` text part.
    /// Query: optional `path`, used when the body carries none.
    pub async fn upload_files(
        State(storage): State<Arc<dyn StorageService>>,
        query: Result<Query<UploadQuery>, QueryRejection>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadFilesResponse>, ApplicationError> {
        let Query(query) = query.map_err(|e| {
            warn!("Invalid upload query: {}", e);
            ApplicationError::BadRequest("Invalid query string".to_string())
        })?;
        let mut multipart = multipart.map_err(|e| {
            warn!("Upload is not a multipart request: {}", e);
            ApplicationError::BadRequest("Expected a multipart/form-data body".to_string())
        })?;

        let mut files: Vec<FileData> = Vec::new();
        let mut body_path: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                FILES_FIELD => {
                    let original_name = field.file_name().map(str::to_string);
                    let content = field.bytes().await.map_err(multipart_error)?.to_vec();

                    match original_name {
                        // A file input submitted with nothing chosen
                        Some(name) if name.is_empty() && content.is_empty() => {
                            debug!("Skipping empty file part");
                        }
                        Some(name) if !name.is_empty() => {
                            files.push(FileData::new(content, name));
                        }
                        _ => {
                            warn!("File part without a filename");
                            return Err(ApplicationError::BadRequest(
                                "Every file part needs a filename".to_string(),
                            ));
                        }
                    }
                }
                PATH_FIELD => {
                    body_path = Some(field.text().await.map_err(multipart_error)?);
                }
                other => debug!("Ignoring multipart field '{}'", other),
            }
        }

        if files.is_empty() {
            return Err(ApplicationError::NoFiles);
        }

        let logical_path = body_path
            .filter(|path| !path.is_empty())
            .or(query.path)
            .unwrap_or_default();
        let normalized = normalize_path(&logical_path);
        let directory = storage.resolve_directory(&normalized).await?;

        let total = files.len();
        let mut stored = Vec::with_capacity(total);
        for file_data in files {
            match storage.store(&directory, file_data).await {
                Ok(file) => stored.push(file),
                Err(e) => {
                    if !stored.is_empty() {
                        warn!(
                            "Upload aborted after {} of {} files; stored files are kept",
                            stored.len(),
                            total
                        );
                    }
                    return Err(e);
                }
            }
        }

        info!(
            "Uploaded {} file(s) into '{}'",
            stored.len(),
            directory.relative
        );

        Ok(Json(UploadFilesResponse {
            message: "Files uploaded successfully".to_string(),
            files: stored.into_iter().map(Into::into).collect(),
        }))
    }

    /// DELETE /delete
    /// Query: `filenames` as a comma-separated list and/or repeated parameter.
    pub async fn delete_files(
        State(storage): State<Arc<dyn StorageService>>,
        RawQuery(query): RawQuery,
    ) -> Result<(StatusCode, Json<DeleteFilesResponse>), ApplicationError> {
        let filenames = parse_filenames(query.as_deref());
        if filenames.is_empty() {
            return Err(ApplicationError::BadRequest(format!(
                "Missing required parameter: {}",
                FILENAMES_PARAM
            )));
        }

        let mut report = DeletionReport::default();
        for filename in filenames {
            let result = storage.delete(&filename).await;
            report.record(filename, result);
        }

        let status = if report.is_success() {
            info!("Deleted {} file(s)", report.succeeded);
            StatusCode::OK
        } else {
            warn!(
                "Deleted {} file(s), {} failed",
                report.succeeded,
                report.errors.len()
            );
            StatusCode::INTERNAL_SERVER_ERROR
        };

        Ok((status, Json(DeleteFilesResponse::from(report))))
    }
}

fn multipart_error(error: MultipartError) -> ApplicationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        warn!("Invalid multipart data: {}", error.body_text());
        ApplicationError::BadRequest("Invalid multipart data".to_string())
    }
}

/// Collect `filenames` and `filenames[]` values, dropping blank entries.
///
/// A query carrying a single `filenames` value is read as a comma-separated
/// list. Once the parameter is repeated or bracketed, each value names exactly
/// one path, so stored names containing a comma stay addressable.
fn parse_filenames(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };

    let entries: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == FILENAMES_PARAM || key == FILENAMES_LIST_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let values: Vec<&str> = match entries.as_slice() {
        [(key, value)] if key == FILENAMES_PARAM => value.split(',').collect(),
        _ => entries.iter().map(|(_, value)| value.as_str()).collect(),
    };

    values
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(
            parse_filenames(Some("filenames=a.txt,docs/b.txt")),
            vec!["a.txt", "docs/b.txt"]
        );
    }

    #[test]
    fn test_parse_repeated_and_bracketed() {
        assert_eq!(
            parse_filenames(Some("filenames=a.txt&other=x&filenames%5B%5D=b.txt&filenames=c.txt")),
            vec!["a.txt", "b.txt", "c.txt"]
        );
    }

    #[test]
    fn test_parse_repeated_values_keep_commas() {
        assert_eq!(
            parse_filenames(Some("filenames=1-report.v1%2Cfinal&filenames=b.txt")),
            vec!["1-report.v1,final", "b.txt"]
        );
        assert_eq!(
            parse_filenames(Some("filenames%5B%5D=docs/1-a.x,y")),
            vec!["docs/1-a.x,y"]
        );
    }

    #[test]
    fn test_parse_decodes_and_drops_blanks() {
        assert_eq!(
            parse_filenames(Some("filenames=my%20file.txt,,%20,x+y.txt")),
            vec!["my file.txt", "x y.txt"]
        );
    }

    #[test]
    fn test_parse_missing() {
        assert!(parse_filenames(None).is_empty());
        assert!(parse_filenames(Some("")).is_empty());
        assert!(parse_filenames(Some("filenames=")).is_empty());
        assert!(parse_filenames(Some("names=a.txt")).is_empty());
    }
}
