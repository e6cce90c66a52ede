//! Catalog error definitions.

use thiserror::Error;

/// Errors surfaced by catalog operations.
///
/// Per-record problems are not errors; they end up in
/// [`LoadReport::skipped`](crate::catalog::LoadReport).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Search path is blank or lacks a leading `/`.
    #[error("Invalid location: {0}")]
    InvalidQuery(String),

    /// The caller handed over something unusable (e.g. an empty upload).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The feed could not be read.
    #[error("Failed to read feed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
