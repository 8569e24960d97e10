//! Health (`/health`, database ping) and liveness (`/health/live`) endpoints.

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<HealthStatus>,
}

impl HealthInfo {
    fn new(status: HealthStatus, database: Option<HealthStatus>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            database,
        }
    }
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(readiness_check))
        .route("/health/live", get(simple_health_check))
}

/// The process is up and serving requests.
pub async fn simple_health_check() -> Json<HealthInfo> {
    Json(HealthInfo::new(HealthStatus::Up, None))
}

/// The database answers a ping; 503 otherwise.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthInfo>) {
    match crate::db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthInfo::new(HealthStatus::Up, Some(HealthStatus::Up))),
        ),
        Err(err) => {
            warn!(error = %err, "database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthInfo::new(HealthStatus::Down, Some(HealthStatus::Down))),
            )
        }
    }
}
