//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the catalog and preload it from `feed.path`
//! - Start the feed watcher and metrics exporter when configured
//!
//! # Design Decisions
//! - Fail fast: an unreadable startup feed is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners are bound by the caller, after bootstrap succeeds

use std::sync::Arc;

use notify::RecommendedWatcher;
use thiserror::Error;

use crate::catalog::{CatalogError, PlatformCatalog};
use crate::config::ServiceConfig;
use crate::feed::FeedWatcher;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load startup feed: {0}")]
    Feed(#[from] CatalogError),

    #[error("Failed to watch feed file: {0}")]
    Watch(#[from] notify::Error),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Everything that must stay alive while the server runs.
pub struct Services {
    pub catalog: Arc<PlatformCatalog>,
    /// Dropping the watcher stops feed hot reload.
    pub watcher: Option<RecommendedWatcher>,
}

/// Initialize subsystems in dependency order. Must run inside a Tokio
/// runtime when metrics are enabled.
pub fn bootstrap(config: &ServiceConfig) -> Result<Services, StartupError> {
    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let catalog = Arc::new(PlatformCatalog::new());

    let watcher = match &config.feed.path {
        Some(path) => {
            let report = catalog.load_file(path)?;
            tracing::info!(
                path = ?path,
                loaded = report.loaded,
                skipped = report.skipped_count(),
                "Startup feed loaded"
            );

            if config.feed.watch {
                Some(FeedWatcher::new(path, Arc::clone(&catalog)).run()?)
            } else {
                None
            }
        }
        None => {
            tracing::info!("No startup feed configured; index is empty until the first upload");
            None
        }
    };

    Ok(Services { catalog, watcher })
}
