use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApplicationError::NotFound(ref msg) => {
                warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg.clone())
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApplicationError::NoFiles => {
                warn!("Upload request without files");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApplicationError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden: invalid or missing API key".to_string(),
            ),
            ApplicationError::PayloadTooLarge => {
                warn!("Request body exceeds the configured limit");
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
