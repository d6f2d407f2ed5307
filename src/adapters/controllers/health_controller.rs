use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::{info, warn};

use crate::application::services::StorageService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: StorageHealth,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct StorageHealth {
    #[serde(rename = "uploadRootAvailable")]
    pub upload_root_available: bool,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(
        State(storage): State<Arc<dyn StorageService>>,
    ) -> (StatusCode, Json<HealthResponse>) {
        info!("Health check requested");

        let upload_root_available = storage.is_available().await;
        let (status_code, status) = if upload_root_available {
            (StatusCode::OK, "healthy")
        } else {
            warn!("Upload root is not available");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        (
            status_code,
            Json(HealthResponse {
                status: status.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                storage: StorageHealth {
                    upload_root_available,
                },
                metrics: SystemMetrics {
                    cpu_usage_percent: sys.global_cpu_usage(),
                    memory_used_bytes: memory_used,
                    memory_total_bytes: memory_total,
                    memory_usage_percent,
                },
            }),
        )
    }
}
