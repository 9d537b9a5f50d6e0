//! Liveness probe, mounted at the root next to the storefront.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a dependency is unavailable.
    pub status: &'static str,
    pub version: &'static str,
    pub site: String,
    pub database: bool,
    /// The upload directory exists, so admin uploads can be stored.
    pub uploads: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = glavtrub_db::health_check(&state.pool).await.is_ok();
    let uploads = tokio::fs::metadata(&state.config.upload_dir)
        .await
        .is_ok_and(|m| m.is_dir());
    if !database {
        tracing::warn!("Health check: database unreachable");
    }

    Json(HealthResponse {
        status: if database && uploads { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        site: state.config.site.name.clone(),
        database,
        uploads,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
