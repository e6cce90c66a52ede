//! Public API handlers.
//!
//! # Endpoints
//! - `POST /api/advertising/load`: replace the catalog from an uploaded feed
//! - `GET /api/advertising/search?location=/a/b`: platforms active at a path
//! - `GET /health`: liveness

use std::error::Error as StdError;
use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use http_body_util::LengthLimitError;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, LoadReport, PlatformCatalog, RawRecord, SkippedRecord};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Multipart field carrying the feed.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub location: Option<String>,
}

/// Response body for a successful load.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub skipped_records: Vec<SkippedRecord>,
}

impl From<LoadReport> for LoadSummary {
    fn from(report: LoadReport) -> Self {
        Self {
            loaded: report.loaded,
            skipped: report.skipped_count(),
            skipped_records: report.skipped,
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn search_platforms(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let request_id = request_id(&headers);
    let location = params.location.unwrap_or_default();

    match state.catalog.search(&location) {
        Ok(platforms) => {
            tracing::debug!(
                request_id = %request_id,
                location = %location,
                matches = platforms.len(),
                "Search served"
            );
            Ok(Json(platforms))
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, location = %location, "Invalid location parameter");
            Err(e.into())
        }
    }
}

pub async fn load_platforms(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<LoadSummary>, ApiError> {
    let request_id = request_id(request.headers()).to_owned();
    let limit = state.config.feed.max_upload_bytes;

    let job = match read_upload(request, limit).await {
        Ok(job) => job,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected feed upload");
            return Err(e);
        }
    };

    let catalog = Arc::clone(&state.catalog);
    let report = run_load(catalog, job).await?;

    tracing::info!(
        request_id = %request_id,
        loaded = report.loaded,
        skipped = report.skipped_count(),
        "Feed upload processed"
    );
    Ok(Json(report.into()))
}

/// Parse and rebuild on the blocking pool; both are CPU-bound.
pub(crate) async fn run_load(
    catalog: Arc<PlatformCatalog>,
    job: LoadJob,
) -> Result<LoadReport, ApiError> {
    tokio::task::spawn_blocking(move || match job {
        LoadJob::Feed(bytes) => catalog.load_feed(Cursor::new(bytes)),
        LoadJob::Records(records) => Ok(catalog.load(records)),
        LoadJob::File(path) => catalog.load_file(&path),
    })
    .await
    .map_err(|e| ApiError::Internal(format!("load task failed: {e}")))?
    .map_err(ApiError::from)
}

/// Work handed to the blocking pool.
pub(crate) enum LoadJob {
    Feed(Bytes),
    Records(Vec<RawRecord>),
    File(std::path::PathBuf),
}

async fn read_upload(request: Request, limit: usize) -> Result<LoadJob, ApiError> {
    let content_type = content_type(request.headers());

    let bytes = if content_type.starts_with("multipart/form-data") {
        read_multipart_file(request).await?
    } else {
        axum::body::to_bytes(request.into_body(), limit)
            .await
            .map_err(body_read_error)?
    };

    if bytes.is_empty() {
        return Err(CatalogError::InvalidInput("upload is empty".into()).into());
    }

    if content_type.starts_with("application/json") {
        let records: Vec<RawRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            CatalogError::InvalidInput(format!("records are not valid JSON: {e}"))
        })?;
        return Ok(LoadJob::Records(records));
    }

    if std::str::from_utf8(&bytes).is_err() {
        return Err(CatalogError::InvalidInput("feed is not valid UTF-8".into()).into());
    }
    Ok(LoadJob::Feed(bytes))
}

/// Bytes of the `file` field, or of the first field that carries a file name.
async fn read_multipart_file(request: Request) -> Result<Bytes, ApiError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) || field.file_name().is_some() {
            return Ok(field.bytes().await?);
        }
    }

    Err(CatalogError::InvalidInput(format!("multipart upload has no '{FILE_FIELD}' field")).into())
}

/// 413 when the body hit a size limit mid-stream, 500 otherwise.
fn body_read_error(err: axum::Error) -> ApiError {
    let mut source: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return ApiError::Rejected {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: "Upload exceeds the size limit".into(),
            };
        }
        source = e.source();
    }
    ApiError::Internal(format!("failed to read upload body: {err}"))
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default()
}
