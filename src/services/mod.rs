mod error;
mod local_storage;

pub use error::StorageError;
pub use local_storage::LocalStorageService;

use std::sync::Arc;

use tracing::info;

use crate::{application::services::StorageService, domain::config::server::ServerConfig};

pub async fn create_storage_service(
    config: &ServerConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    let service = LocalStorageService::open(&config.upload_root).await?;
    info!("Upload root ready at {}", service.root().display());
    Ok(Arc::new(service))
}
