use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::handlers::{run_load, LoadJob, LoadSummary};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::index::IndexStats;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub generation: u64,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        generation: state.catalog.stats().generation,
    })
}

pub async fn get_index(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.catalog.stats())
}

/// Reload the catalog from the configured feed file.
pub async fn reload_feed(State(state): State<AppState>) -> Result<Json<LoadSummary>, ApiError> {
    let Some(path) = state.config.feed.path.clone() else {
        return Err(ApiError::BadRequest("No feed path configured".into()));
    };

    tracing::info!(path = ?path, "Reloading feed on admin request");
    let report = run_load(Arc::clone(&state.catalog), LoadJob::File(path)).await?;
    Ok(Json(report.into()))
}
