mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{router::create_router, state::AppState};
use domain::config::{secrets::Secrets, server::ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = ServerConfig::from_env().expect("ERROR: Invalid server configuration");
    let secrets = Secrets::from_env();

    if secrets.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every upload and delete request will be rejected");
    }

    let storage_service = services::create_storage_service(&config)
        .await
        .expect("ERROR: Failed to prepare the upload directory. Check UPLOAD_DIR and permissions.");

    let port = config.port;
    let app_state = AppState {
        config: Arc::new(config),
        secrets: Arc::new(secrets),
        storage_service,
    };

    let router = create_router(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}
