use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::{application::error::ApplicationError, domain::config::secrets::Secrets};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Exact, case-sensitive match of the presented key.
pub fn authorize(provided_key: Option<&str>, expected_key: &str) -> bool {
    match provided_key {
        Some(provided) => constant_time_eq(provided.as_bytes(), expected_key.as_bytes()),
        None => false,
    }
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Middleware to validate the x-api-key header
pub async fn validate_api_key(
    State(secrets): State<Arc<Secrets>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected_key) = secrets.api_key.as_deref() else {
        warn!("API_KEY is not configured, rejecting protected request");
        return ApplicationError::Forbidden.into_response();
    };

    let provided_key = match headers.get(API_KEY_HEADER) {
        Some(value) => match value.to_str() {
            Ok(key) => Some(key),
            Err(_) => {
                warn!("{} header contains invalid characters", API_KEY_HEADER);
                return ApplicationError::Forbidden.into_response();
            }
        },
        None => {
            warn!("{} header is missing", API_KEY_HEADER);
            None
        }
    };

    if authorize(provided_key, expected_key) {
        next.run(request).await
    } else {
        if provided_key.is_some() {
            warn!("Invalid key provided in {} header", API_KEY_HEADER);
        }
        ApplicationError::Forbidden.into_response()
    }
}
