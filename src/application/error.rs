use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("No files were uploaded")]
    NoFiles,

    #[error("Forbidden")]
    Forbidden,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    InternalError(String),
}
