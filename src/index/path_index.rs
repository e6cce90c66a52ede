//! Path-indexed platform lookup with a per-snapshot result cache.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use serde::Serialize;

use crate::index::platform::Platform;
use crate::index::trie::{canonical, normalize, segments, TrieNode};
use crate::observability::metrics;

/// Result of a lookup. Ordered, so callers get a stable listing for free.
pub type PlatformSet = BTreeSet<String>;

/// Counters describing the currently published index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Incremented by every build; 0 means never built.
    pub generation: u64,
    pub platforms: usize,
    pub locations: usize,
    pub nodes: usize,
    pub cached_paths: usize,
}

/// A fully built tree together with the cache derived from it.
struct IndexSnapshot {
    root: TrieNode,
    cache: DashMap<String, Arc<PlatformSet>>,
    generation: u64,
    platforms: usize,
    locations: usize,
    nodes: usize,
}

impl IndexSnapshot {
    fn empty() -> Self {
        Self {
            root: TrieNode::new(),
            cache: DashMap::new(),
            generation: 0,
            platforms: 0,
            locations: 0,
            nodes: 1,
        }
    }
}

/// Maps location paths to the platforms active there.
///
/// Readers load the current snapshot without locking. `build` assembles a
/// new snapshot privately and publishes it with a single pointer swap, so a
/// lookup in flight keeps using the snapshot it started with.
pub struct PathIndex {
    current: ArcSwap<IndexSnapshot>,
    generations: AtomicU64,
}

impl PathIndex {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(IndexSnapshot::empty()),
            generations: AtomicU64::new(0),
        }
    }

    /// Replace the whole index with one built from `platforms`.
    pub fn build<'a, I>(&self, platforms: I)
    where
        I: IntoIterator<Item = &'a Platform>,
    {
        let started = Instant::now();
        let mut root = TrieNode::new();
        let mut platform_count = 0;
        let mut location_count = 0;

        for platform in platforms {
            platform_count += 1;
            for location in &platform.locations {
                let normalized = normalize(location);
                root.insert(segments(&normalized), &platform.name);
                location_count += 1;
            }
        }

        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        let nodes = root.node_count();
        let snapshot = IndexSnapshot {
            root,
            cache: DashMap::new(),
            generation,
            platforms: platform_count,
            locations: location_count,
            nodes,
        };
        self.current.store(Arc::new(snapshot));

        metrics::record_index_build(platform_count, nodes);
        tracing::debug!(
            generation,
            platforms = platform_count,
            locations = location_count,
            nodes,
            elapsed = ?started.elapsed(),
            "Path index rebuilt"
        );
    }

    /// Platforms registered at `path` or at any of its ancestors.
    pub fn lookup(&self, path: &str) -> Arc<PlatformSet> {
        let snapshot = self.current.load();
        let key = canonical(path);

        if let Some(hit) = snapshot.cache.get(&key) {
            metrics::record_cache_lookup(true);
            return Arc::clone(hit.value());
        }
        metrics::record_cache_lookup(false);

        let mut found = PlatformSet::new();
        snapshot.root.collect_along(segments(&key), &mut found);
        let found = Arc::new(found);
        snapshot.cache.insert(key, Arc::clone(&found));
        found
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.current.load();
        IndexStats {
            generation: snapshot.generation,
            platforms: snapshot.platforms,
            locations: snapshot.locations,
            nodes: snapshot.nodes,
            cached_paths: snapshot.cache.len(),
        }
    }
}

impl Default for PathIndex {
    fn default() -> Self {
        Self::new()
    }
}
