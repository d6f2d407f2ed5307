use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::{secrets::Secrets, server::ServerConfig},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub secrets: Arc<Secrets>,
    pub storage_service: Arc<dyn StorageService>,
}
