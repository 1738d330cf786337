use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Settings;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    pub generator: String,
}

pub struct HealthHandler {
    settings: Arc<Settings>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                config: "ok".to_string(),
                generator: "ok".to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - the loaded settings must pass validation
    pub async fn ready(&self) -> impl IntoResponse {
        match self.settings.validate() {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ready",
                    "message": "Server is ready to accept requests"
                })),
            ),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "message": e.to_string()
                })),
            ),
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "alive",
                "message": "Server is alive"
            })),
        )
    }
}
