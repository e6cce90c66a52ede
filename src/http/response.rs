//! Mapping service errors to HTTP responses.
//!
//! # Design Decisions
//! - Client errors carry their message as plain text
//! - Internal failures are logged with detail and answered with an opaque 500

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before reaching the catalog or index.
    #[error("{0}")]
    BadRequest(String),

    /// Rejected with a specific status (e.g. multipart limits).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Anything unexpected. The detail is logged, never returned.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidQuery(_) | CatalogError::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CatalogError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            ApiError::Internal(err.body_text())
        } else {
            ApiError::Rejected {
                status,
                message: err.body_text(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Rejected { status, message } => (status, message).into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_mapping() {
        let err = ApiError::from(CatalogError::InvalidQuery("'ru'".into()));
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid location: 'ru'"));

        let err = ApiError::from(CatalogError::Io(std::io::Error::other("disk gone")));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let response = ApiError::Internal("secret path /etc/feed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }

    #[test]
    fn test_bad_request_status() {
        let response = ApiError::BadRequest("Upload is empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
