use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

use crate::api::middleware::error_handling::sanitize_db_error;

const SERVICE_NAME: &str = "catalog_service";
const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Liveness response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Readiness response
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    fn new(status: &str, database: &str, started: Instant, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            database: database.to_string(),
            response_time_ms: started.elapsed().as_millis() as u64,
            error,
        }
    }
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/ready
/// Checks the database with `SELECT 1`. Without a database the service is
/// ready as soon as it serves requests.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Option<Arc<PgPool>>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let started = Instant::now();

    let Some(pool) = pool else {
        return (
            StatusCode::OK,
            Json(ReadinessResponse::new("ready", "not_configured", started, None)),
        );
    };

    let check = tokio::time::timeout(
        READINESS_TIMEOUT,
        sqlx::query("SELECT 1").execute(pool.as_ref()),
    )
    .await;

    match check {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(ReadinessResponse::new("ready", "connected", started, None)),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse::new(
                    "not_ready",
                    "disconnected",
                    started,
                    Some(sanitize_db_error(&e)),
                )),
            )
        }
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse::new(
                "not_ready",
                "timeout",
                started,
                Some(format!(
                    "Database query timed out after {} seconds",
                    READINESS_TIMEOUT.as_secs()
                )),
            )),
        ),
    }
}
