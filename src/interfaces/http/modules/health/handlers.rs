//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check state. `db` is `None` when users live in memory.
#[derive(Clone)]
pub struct HealthState {
    pub db: Option<Arc<DatabaseConnection>>,
    pub started_at: Arc<Instant>,
}

impl HealthState {
    pub fn new(db: Option<Arc<DatabaseConnection>>) -> Self {
        Self {
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub backend: String,
    pub status: String,
    pub latency_ms: Option<u64>,
}

async fn ping(db: &DatabaseConnection) -> ComponentHealth {
    let started = Instant::now();
    let result = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await;

    match result {
        Ok(_) => ComponentHealth {
            backend: "database".to_string(),
            status: "ok".to_string(),
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database ping failed");
            ComponentHealth {
                backend: "database".to_string(),
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = match &state.db {
        Some(db) => ping(db).await,
        None => ComponentHealth {
            backend: "memory".to_string(),
            status: "ok".to_string(),
            latency_ms: Some(0),
        },
    };

    let (status, http_status) = if storage.status == "ok" {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            storage,
        }),
    )
}
