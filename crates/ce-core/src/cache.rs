//! Route table cache.
//!
//! Memoizes loaded tables keyed by [`SourceKey`]. Repeated lookups with an
//! unchanged key hand back the same `Arc`; a changed file (new mtime or
//! length) produces a new key and replaces the stale entry for that path.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::data::{DataError, RouteSource, RouteTable, SourceKey};

/// A cached table with metadata.
#[derive(Debug, Clone)]
struct CachedTable {
    table: Arc<RouteTable>,
    loaded_at: DateTime<Utc>,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Table cache manager.
#[derive(Debug, Default)]
pub struct TableCache {
    entries: HashMap<SourceKey, CachedTable>,
    hits: u64,
    misses: u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached table for `source` or load it.
    ///
    /// Load failures are not cached; a missing file is retried on the next
    /// call.
    pub fn get_or_load(&mut self, source: &dyn RouteSource) -> Result<Arc<RouteTable>, DataError> {
        let key = source.key()?;

        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            debug!(source = %source.describe(), "using cached route table");
            return Ok(Arc::clone(&cached.table));
        }

        self.misses += 1;
        info!(source = %source.describe(), "loading route table");
        let table = Arc::new(source.load()?);

        if let SourceKey::File { path, .. } = &key {
            let stale: Vec<SourceKey> = self
                .entries
                .keys()
                .filter(|k| matches!(k, SourceKey::File { path: p, .. } if p == path))
                .cloned()
                .collect();
            for k in stale {
                debug!(path = %path.display(), "dropping stale route table");
                self.entries.remove(&k);
            }
        }

        self.entries.insert(
            key,
            CachedTable {
                table: Arc::clone(&table),
                loaded_at: Utc::now(),
            },
        );
        Ok(table)
    }

    /// Cached table for `key`, without loading.
    pub fn get(&self, key: &SourceKey) -> Option<Arc<RouteTable>> {
        self.entries.get(key).map(|c| Arc::clone(&c.table))
    }

    /// When the table for `key` was loaded.
    pub fn loaded_at(&self, key: &SourceKey) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|c| c.loaded_at)
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &SourceKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
