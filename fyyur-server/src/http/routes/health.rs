//! Service index and health check

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Index response
#[derive(Serialize)]
pub struct IndexResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub resources: [&'static str; 4],
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        service: "fyyur",
        version: env!("CARGO_PKG_VERSION"),
        resources: ["/venues", "/artists", "/shows", "/genres"],
    })
}

/// GET /health - 503 when the database does not answer
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|e| tracing::warn!("health check query failed: {}", e))
        .is_ok();

    let (code, status, database) = if database_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Index and health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}
