use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    adapters::{
        controllers::{file_controller::FileController, health_controller::HealthController},
        middleware::validate_api_key,
        state::AppState,
    },
    domain::config::server::ServerConfig,
};

fn create_cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Skipping invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}

pub fn create_router(app_state: AppState) -> Router {
    // Routes that require the x-api-key header
    let protected_routes = Router::new()
        .route("/upload", post(FileController::upload_files))
        .route("/delete", delete(FileController::delete_files))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_api_key,
        ));

    let public_routes = Router::new()
        .route("/health", get(HealthController::health_check))
        .nest_service("/uploads", ServeDir::new(&app_state.config.upload_root));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(app_state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&app_state.config))
        .with_state(app_state)
}
