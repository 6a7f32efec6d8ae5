//! Health check handlers and response types.

use crate::state::{DbState, MediaConfig};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub storage: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - metadata store reachable.
pub async fn readiness_check(State(db): State<DbState>) -> impl IntoResponse {
    let database = run_check(TIMEOUT, db.photos.ping(), "not_ready").await;
    let ready = database == "healthy";

    if !ready {
        tracing::error!(database = %database, "Database readiness check failed");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let (status, database) = if ready {
        ("ready", "ready".to_string())
    } else {
        ("not_ready", database)
    };

    (
        status_code,
        Json(serde_json::json!({ "status": status, "database": database })),
    )
}

/// Full health check (metadata store and object store).
///
/// The object store probe is a HEAD on a key that normally does not exist, so
/// only connectivity is measured.
pub async fn health_check(
    State(db): State<DbState>,
    State(media): State<MediaConfig>,
) -> impl IntoResponse {
    let database = run_check(TIMEOUT, db.photos.ping(), "unhealthy").await;

    let probe_key = format!("{}/.health-check", media.upload.partition);
    let storage = run_check(
        TIMEOUT,
        async move { media.storage.exists(&probe_key).await.map(drop) },
        "degraded",
    )
    .await;

    let healthy = database == "healthy" && storage == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        database,
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
