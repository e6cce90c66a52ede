//! Platform catalog: validation in front of the path index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::types::{LoadReport, RawRecord, Validation};
use crate::feed::parse_feed;
use crate::index::{IndexStats, PathIndex};
use crate::observability::metrics;

/// Accepts platform records, drives index rebuilds and answers searches.
#[derive(Default)]
pub struct PlatformCatalog {
    index: PathIndex,
}

impl PlatformCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `records` and rebuild the index from the survivors.
    ///
    /// The index is rebuilt even when nothing survives, which leaves it
    /// empty.
    pub fn load<I>(&self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut platforms = Vec::new();
        let mut report = LoadReport::default();

        for record in records {
            match record.validate() {
                Validation::Accepted(platform) => platforms.push(platform),
                Validation::Skipped(skipped) => {
                    tracing::warn!(
                        line = ?skipped.line,
                        name = ?skipped.name,
                        reason = %skipped.reason,
                        "Skipping platform record"
                    );
                    report.skipped.push(skipped);
                }
            }
        }

        self.index.build(&platforms);
        report.loaded = platforms.len();

        metrics::record_feed_records(report.loaded, report.skipped_count());
        if report.loaded == 0 {
            tracing::info!(skipped = report.skipped_count(), "No platforms loaded");
        } else {
            tracing::info!(
                loaded = report.loaded,
                skipped = report.skipped_count(),
                "Platforms loaded"
            );
        }
        report
    }

    /// Parse a `name:loc1,loc2` feed and load it.
    ///
    /// A read error aborts before the index is touched.
    pub fn load_feed<R: BufRead>(&self, reader: R) -> CatalogResult<LoadReport> {
        let feed = parse_feed(reader)?;
        let mut report = self.load(feed.records);
        report.skipped.extend(feed.malformed);
        report.skipped.sort_by_key(|skipped| skipped.line);
        Ok(report)
    }

    pub fn load_file(&self, path: &Path) -> CatalogResult<LoadReport> {
        let file = File::open(path)?;
        self.load_feed(BufReader::new(file))
    }

    /// Names of platforms active at `path`, sorted lexicographically.
    pub fn search(&self, path: &str) -> CatalogResult<Vec<String>> {
        let trimmed = path.trim();
        if trimmed.is_empty() || !trimmed.starts_with('/') {
            return Err(CatalogError::InvalidQuery(format!("'{}'", path)));
        }

        Ok(self.index.lookup(trimmed).iter().cloned().collect())
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
