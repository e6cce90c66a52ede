//! Feed file watcher for hot reload.
//!
//! Change events are debounced: the catalog reloads once the file has been
//! quiet for [`SETTLE_DELAY`]. A writer that truncates and then rewrites in
//! place is normally covered by that window, but replacing the file with an
//! atomic rename is the only way to guarantee a reload never sees a partial
//! feed.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::catalog::PlatformCatalog;

/// Quiet period after the last change event before reloading.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Reloads the catalog whenever the feed file changes on disk.
pub struct FeedWatcher {
    path: PathBuf,
    catalog: Arc<PlatformCatalog>,
}

impl FeedWatcher {
    pub fn new(path: &Path, catalog: Arc<PlatformCatalog>) -> Self {
        Self {
            path: path.to_path_buf(),
            catalog,
        }
    }

    /// Start watching. Keep the returned watcher alive for as long as
    /// reloads should happen; dropping it stops the watch and the reload
    /// thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (change_tx, change_rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = change_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        let catalog = self.catalog;
        let path = self.path.clone();
        std::thread::Builder::new()
            .name("admatch-feed-reload".into())
            .spawn(move || debounce(change_rx, SETTLE_DELAY, || reload(&catalog, &path)))
            .map_err(notify::Error::io)?;

        tracing::info!(path = ?self.path, "Feed watcher started");
        Ok(watcher)
    }
}

fn reload(catalog: &PlatformCatalog, path: &Path) {
    tracing::info!(path = ?path, "Feed file change detected, reloading");
    match catalog.load_file(path) {
        Ok(report) => tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped_count(),
            "Feed reloaded"
        ),
        Err(e) => tracing::error!(error = %e, "Failed to reload feed, keeping current index"),
    }
}

/// Call `on_settled` once per burst of events, after `quiet` has passed
/// with no further event. Returns when every sender is gone; a burst cut
/// short by disconnection still fires.
fn debounce<F: FnMut()>(events: Receiver<()>, quiet: Duration, mut on_settled: F) {
    while events.recv().is_ok() {
        loop {
            match events.recv_timeout(quiet) {
                Ok(()) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    on_settled();
                    return;
                }
            }
        }
        on_settled();
    }
}
